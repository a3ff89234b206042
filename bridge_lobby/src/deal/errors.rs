//! Deal orchestrator error types.

use crate::{game::DeckError, storage::StorageError, table::TableError};
use thiserror::Error;

/// Deal errors
#[derive(Debug, Error)]
pub enum DealError {
    /// Spectators cannot deal
    #[error("Spectators cannot deal cards")]
    NotAuthorized,

    /// Deck ran out mid-cycle; no hands were produced
    #[error(transparent)]
    InsufficientCards(#[from] DeckError),

    /// Selected table could not be read
    #[error(transparent)]
    Table(#[from] TableError),

    /// Deck color could not be persisted
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DealError {
    pub fn client_message(&self) -> String {
        match self {
            DealError::Table(e) => e.client_message(),
            DealError::Storage(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for deal operations
pub type DealResult<T> = Result<T, DealError>;
