//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Datastore failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-key violation on insert
    #[error("Course already exists: {0}")]
    Duplicate(String),

    /// Update or delete targeted an absent id
    #[error("Course not found: {0}")]
    Missing(String),

    /// Underlying SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    LockPoisoned,
}
