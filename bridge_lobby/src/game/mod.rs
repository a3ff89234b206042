//! Card game model - cards, deck, seats and hands.
//!
//! This module provides:
//! - `Card`, `Rank`, `Suit` value types and the 52-card `Deck`
//! - Fisher-Yates shuffling and prefix dealing
//! - Canonical color-interleaved display ordering of a hand
//! - High-card point valuation

// Submodules
pub mod constants;
pub mod entities;
pub mod errors;
pub mod functional;

pub use entities::{Card, Color, Deck, Hand, Rank, SeatLabel, Suit};
pub use errors::{DeckError, DeckResult};
