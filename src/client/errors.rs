//! # Client Errors

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Console client failures
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request could not be completed
    #[error("The HTTP request failed with error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading the console or writing to it failed
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CA certificate could not be loaded
    #[error("Failed to load CA certificate: {0}")]
    Certificate(String),
}
