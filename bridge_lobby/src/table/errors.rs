//! Table registry error types.

use super::models::TableId;
use crate::{game::SeatLabel, storage::StorageError};
use thiserror::Error;

/// Table registry errors
#[derive(Debug, Error)]
pub enum TableError {
    /// No table with this id
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Seat already occupied
    #[error("Seat {seat} is taken by {occupant}")]
    SeatTaken {
        table_id: TableId,
        seat: SeatLabel,
        occupant: String,
    },

    /// User already holds a seat at this table
    #[error("{username} is already seated at {seat} on this table")]
    AlreadySeated {
        table_id: TableId,
        seat: SeatLabel,
        username: String,
    },

    /// User already watches this table
    #[error("{username} is already a spectator at this table")]
    AlreadySpectating { table_id: TableId, username: String },

    /// Table changed since it was read
    #[error("Table {table_id} was modified concurrently: expected revision {expected}, found {actual}")]
    Conflict {
        table_id: TableId,
        expected: u64,
        actual: u64,
    },

    /// Table name rejected
    #[error("Invalid table name: {0}")]
    InvalidName(String),

    /// Username rejected
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TableError {
    /// Seat/spectator state rejected the operation; nothing was written.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            TableError::TableNotFound(_)
                | TableError::SeatTaken { .. }
                | TableError::AlreadySeated { .. }
                | TableError::AlreadySpectating { .. }
        )
    }

    /// Input was rejected before touching any state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TableError::InvalidName(_) | TableError::InvalidUsername(_)
        )
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Storage errors are sanitized and table ids are omitted.
    pub fn client_message(&self) -> String {
        match self {
            TableError::TableNotFound(_) => "Table not found".to_string(),
            TableError::Conflict { .. } => {
                "The table changed while you were looking at it, refresh and try again"
                    .to_string()
            }
            TableError::Storage(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for table registry operations
pub type TableResult<T> = Result<T, TableError>;
