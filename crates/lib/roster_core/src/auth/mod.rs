//! Authentication and authorization logic.
//!
//! Password hashing, JWT issuance/verification, token revocation and the
//! credential queries used by `roster_api`.

pub mod jwt;
pub mod password;
pub mod queries;
pub mod revocation;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
