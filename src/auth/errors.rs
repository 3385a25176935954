//! # Auth Errors
//!
//! Error types for the shared-key check.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Shared-key authentication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `key` query parameter on the request
    #[error("Please supply access key")]
    MissingKey,

    /// Key supplied but does not match
    #[error("Invalid key")]
    InvalidKey,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingKey => 401,
            AuthError::InvalidKey => 401,
        }
    }
}
