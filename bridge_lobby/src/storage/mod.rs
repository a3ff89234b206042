//! Storage module isolating every persistence call behind a narrow
//! get/set/remove interface.
//!
//! This module implements:
//! - `KeyValueStore`: the trait injected into the registry, session selector,
//!   deal orchestrator and identity provider
//! - `MemoryStore`: in-memory implementation for tests
//! - `FileStore`: one JSON file per key, shared between client processes
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::storage::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("lastDeckColor", "\"blue\"").unwrap();
//! assert_eq!(store.get("lastDeckColor").unwrap().as_deref(), Some("\"blue\""));
//! ```

pub mod config;
pub mod errors;
pub mod store;

pub use config::StorageConfig;
pub use errors::{StorageError, StorageResult};
pub use store::{FileStore, KeyValueStore, MemoryStore, read_json, write_json};
