//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit.

use std::fmt;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Datastore could not be opened
    StoreError,
    /// Server failed to start or stopped abnormally
    ServeFailed,
    /// Console session failed
    ClientError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "COURSELIST_CLI_CONFIG_ERROR",
            Self::StoreError => "COURSELIST_CLI_STORE_ERROR",
            Self::ServeFailed => "COURSELIST_CLI_SERVE_FAILED",
            Self::ClientError => "COURSELIST_CLI_CLIENT_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreError, msg)
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::store_error(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        Self::new(CliErrorCode::ClientError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
