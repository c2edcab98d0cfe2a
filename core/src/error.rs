//! Error types for machine operations
//!
//! Only configuration errors are fatal. Storage errors are reported to the
//! caller of the store, which logs them and keeps the session running.

use thiserror::Error;

/// Invalid machine configuration, detected at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The catalog must contain at least one item
    #[error("catalog size must be positive, got {0}")]
    EmptyCatalog(u32),
    /// The storage key is used verbatim by the backend and cannot be blank
    #[error("storage key must not be empty")]
    EmptyStorageKey,
}

/// Failure talking to a durable key-value backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The collection could not be encoded or decoded
    #[error("collection serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
