//! Card and deck error types.

use thiserror::Error;

/// Deck errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// More cards requested than remain in the deck
    #[error("Insufficient cards: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// Result type for deck operations
pub type DeckResult<T> = Result<T, DeckError>;
