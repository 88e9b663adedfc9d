//! Storage error types for the widget stores.

use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Widget not found
    #[error("Widget not found: {id}")]
    NotFound { id: i64 },
    /// Version conflict in optimistic locking
    #[error("Version conflict on widget {id}: expected {expected_version}, got {current_version}")]
    VersionConflict {
        id: i64,
        expected_version: i32,
        current_version: i32,
    },
    /// Widget failed validation
    #[error("Invalid widget: {0}")]
    Invalid(String),
    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}
