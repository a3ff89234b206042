//! # Bridge Lobby
//!
//! A bridge card-table lobby: named tables with four seats and a spectator
//! list, shared between client sessions through a persisted registry, plus
//! the deal cycle that shuffles, deals, sorts and scores four hands.
//!
//! ## Architecture
//!
//! Components are layered from the leaves up:
//!
//! - **Card/Deck model**: cards, Fisher-Yates shuffle, prefix dealing,
//!   color-interleaved hand sorting and high-card points
//! - **Storage**: a narrow get/set/remove key-value interface with in-memory
//!   and file-backed implementations
//! - **Table registry**: persisted tables with revision-checked commits
//! - **Session selector**: the local actor's table, seat and role
//! - **Deal orchestrator**: one deal cycle plus the alternating deck color
//! - **Auth** and **Lobby**: mock identity provider and the facade a client
//!   renders
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::{Deck, Hand, SeatLabel};
//!
//! let mut deck = Deck::new();
//! deck.shuffle();
//! let cards = deck.deal(13).unwrap();
//! let hand = Hand::new(SeatLabel::South, &cards);
//! assert!(hand.points <= 37);
//! ```

/// Cards, deck, seats, hands and the sort/score functions.
pub mod game;
pub use game::{
    Card, Color, Deck, DeckError, Hand, Rank, SeatLabel, Suit,
    constants::{self, DECK_SIZE, HAND_SIZE, NUM_SEATS},
    entities, functional,
};

/// Key-value persistence.
pub mod storage;

/// Persisted table registry.
pub mod table;

/// Local seat/spectator selection.
pub mod session;

/// Deal cycle.
pub mod deal;

/// Mock identity provider.
pub mod auth;

/// Client-facing facade.
pub mod lobby;
pub use lobby::{Lobby, LobbyConfig, LobbyError};
