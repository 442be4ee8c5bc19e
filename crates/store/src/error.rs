/// Errors surfaced by store backends.
///
/// Driver failures are opaque to callers: they surface as a generic
/// operation failure on the request that hit them and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
