/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The supplied token was malformed, expired, or signed with the
    /// wrong key.
    #[error("invalid token")]
    InvalidToken,
    /// Sign-in with an email that matches no account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Sign-in with a password that does not match the stored hash.
    #[error("invalid password")]
    InvalidPassword,
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("failed to sign token: {0}")]
    Sign(String),
    #[error(transparent)]
    Store(#[from] taskboard_store::StoreError),
}
