//! Authentication for the taskboard gateway.
//!
//! Two concerns live here:
//! - password hashing and verification (argon2id, random salt)
//! - stateless session tokens: HS256 JWTs bound to a user id with a
//!   7-day expiry, minted and verified only with the server-held secret
//!
//! [`resolve_caller`] reverses a token back into the referenced user
//! document on each request.

pub mod error;
pub mod password;
pub mod token;

pub use {
    error::AuthError,
    password::{hash_password, verify_password},
    token::{Claims, issue_token, resolve_caller},
};
