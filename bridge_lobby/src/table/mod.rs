//! Table module providing the persisted seat and spectator registry.
//!
//! This module implements:
//! - `Table`: a named table with four seats and a spectator list
//! - `TableRegistry`: create/list/join/leave over the shared store
//! - Revision-checked commits so concurrent sessions cannot silently
//!   overwrite each other
//!
//! ## Architecture
//!
//! The registry keeps no cached copy. Each operation reads the current
//! snapshot from the `KeyValueStore`, and each mutation re-reads it before
//! writing. A table whose revision moved since the caller's read fails with
//! `TableError::Conflict`.
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::game::SeatLabel;
//! use bridge_lobby::storage::MemoryStore;
//! use bridge_lobby::table::{RegistryConfig, TableRegistry};
//! use std::sync::Arc;
//!
//! let registry = TableRegistry::open(
//!     Arc::new(MemoryStore::new()),
//!     "bridge_tables",
//!     RegistryConfig::default(),
//! )
//! .unwrap();
//!
//! let table = registry.create_table("Friday club").unwrap();
//! registry.join_seat(&table.id, SeatLabel::South, "alice").unwrap();
//! assert_eq!(registry.available_seat_count(&table.id), 3);
//! ```

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;

pub use config::RegistryConfig;
pub use errors::{TableError, TableResult};
pub use manager::TableRegistry;
pub use models::{Positions, Table, TableCommand, TableId};
