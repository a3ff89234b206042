//! Session module tracking the local actor's table, seat and role.
//!
//! The selection is a single persisted slot. It references a table by id
//! and never holds a copy of it, so seat state is always read from the
//! registry.
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::game::SeatLabel;
//! use bridge_lobby::session::SessionSelector;
//! use bridge_lobby::storage::{KeyValueStore, MemoryStore};
//! use bridge_lobby::table::{RegistryConfig, TableRegistry};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let registry = TableRegistry::open(store.clone(), "bridge_tables", RegistryConfig::default()).unwrap();
//! let table = registry.create_table("T1").unwrap();
//!
//! let mut selector = SessionSelector::load(registry, store, "bridge_current_selection");
//! selector.join_seat(&table.id, SeatLabel::North, "alice").unwrap();
//! assert!(selector.current().is_seat(&table.id, SeatLabel::North));
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{SessionError, SessionResult};
pub use manager::SessionSelector;
pub use models::{Role, SessionSelection};
