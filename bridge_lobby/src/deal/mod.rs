//! Deal module composing the deck, registry and session selection into one
//! deal cycle.
//!
//! A deal shuffles a fresh deck, hands 13 cards to each seat in draw order
//! (SOUTH, WEST, NORTH, EAST), sorts and scores each hand, then flips the
//! persisted deck color. Spectators cannot deal.
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::deal::{DealOrchestrator, DeckColor};
//! use bridge_lobby::session::SessionSelection;
//! use bridge_lobby::storage::{KeyValueStore, MemoryStore};
//! use bridge_lobby::table::{RegistryConfig, TableRegistry};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let registry = TableRegistry::new(store.clone(), "bridge_tables", RegistryConfig::default());
//! let dealer = DealOrchestrator::new(registry, store, "lastDeckColor");
//!
//! let outcome = dealer.deal(&SessionSelection::default()).unwrap();
//! assert_eq!(outcome.hands.len(), 4);
//! assert_eq!(outcome.deck_color, DeckColor::Blue);
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{DealError, DealResult};
pub use manager::DealOrchestrator;
pub use models::{DealOutcome, DeckColor};
