//! Storage error types.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store cannot currently serve requests
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Get a client-safe error message that doesn't leak filesystem paths
    /// or record contents.
    pub fn client_message(&self) -> String {
        match self {
            StorageError::Io(_) => "Storage failure".to_string(),
            StorageError::Serialization(_) => "Stored data is corrupted".to_string(),
            StorageError::Unavailable(_) => "Storage unavailable".to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
