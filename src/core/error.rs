//! Custom error types for the drive.
//!
//! - [`StorageError`] - Storage adapter read/write failures
//! - [`DriveError`] - Persistence and mutation failures surfaced to callers

use thiserror::Error;

/// Errors raised by a [`StorageAdapter`](super::StorageAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backing store (localStorage, IndexedDB) not available.
    #[error("storage not available")]
    Unavailable,
    /// Reading a key failed.
    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },
    /// Writing a key failed.
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

impl StorageError {
    pub fn read(key: &str, reason: impl Into<String>) -> Self {
        Self::Read {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn write(key: &str, reason: impl Into<String>) -> Self {
        Self::Write {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by drive operations.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Serializing a collection failed.
    #[error("failed to encode drive state: {0}")]
    Encode(#[source] serde_json::Error),
    /// A stored blob is not valid JSON for its collection.
    #[error("malformed data under '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// No randomness available for id generation.
    #[error("failed to generate id: {0}")]
    Entropy(#[from] getrandom::Error),
}

impl DriveError {
    /// Check if this error came from the storage backend.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
