//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format. Folded into `InvalidCredentials` at the
    /// response boundary so a malformed address is indistinguishable from
    /// an unknown one.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ruhiya_core::EmailError),

    /// Invalid credentials (wrong password or admin not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired, or badly signed. One
    /// variant for all token failures: protected routes reject uniformly.
    #[error("invalid token")]
    InvalidToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing failed.
    #[error("token encoding error: {0}")]
    TokenEncoding(jsonwebtoken::errors::Error),
}
