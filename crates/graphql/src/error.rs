//! Mapping from auth and store failures to GraphQL errors.
//!
//! Every failure carries a stable `code` extension so clients can branch
//! without matching on message text. Store failures stay opaque: the
//! driver detail is logged into the message but the code is always
//! `INTERNAL`.

use {
    async_graphql::{Error, ErrorExtensions},
    taskboard_auth::AuthError,
    taskboard_store::StoreError,
};

/// Raised when an operation requires a signed-in caller.
pub fn unauthenticated() -> Error {
    Error::new("authentication required, please sign in")
        .extend_with(|_, e| e.set("code", "UNAUTHENTICATED"))
}

/// Convert an [`AuthError`] into a GraphQL error with its code.
pub fn auth_err(err: AuthError) -> Error {
    let code = match err {
        AuthError::InvalidToken => "INVALID_TOKEN",
        AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        AuthError::InvalidPassword => "INVALID_PASSWORD",
        AuthError::Hash(_) | AuthError::Sign(_) | AuthError::Store(_) => "INTERNAL",
    };
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

/// Convert a [`StoreError`] into a generic operation failure.
pub fn store_err(err: StoreError) -> Error {
    Error::new(format!("store operation failed: {err}"))
        .extend_with(|_, e| e.set("code", "INTERNAL"))
}
