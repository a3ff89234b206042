//! Session selector error types.

use crate::{storage::StorageError, table::TableError};
use thiserror::Error;

/// Session selector errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Registry rejected the seat/spectator change
    #[error(transparent)]
    Table(#[from] TableError),

    /// Selection could not be persisted; any registry change was undone
    #[error("Failed to save session selection: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub fn client_message(&self) -> String {
        match self {
            SessionError::Table(e) => e.client_message(),
            SessionError::Storage(e) => e.client_message(),
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
