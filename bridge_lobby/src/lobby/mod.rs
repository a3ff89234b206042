//! Lobby module: the surface a client renders.
//!
//! `Lobby` composes the identity provider, the session selector and the
//! deal orchestrator. It requires a logged-in user for joins and deals,
//! implements logout as leave-then-logout, and restricts the registry reset
//! to admins.
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::game::SeatLabel;
//! use bridge_lobby::lobby::{Lobby, LobbyConfig};
//! use bridge_lobby::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut lobby = Lobby::open(Arc::new(MemoryStore::new()), &LobbyConfig::instant())?;
//!     lobby.login("alice", "secret").await?;
//!
//!     let table = lobby.create_table("Friday club")?;
//!     lobby.join_seat(&table.id, SeatLabel::South)?;
//!
//!     let outcome = lobby.deal().await?;
//!     for hand in &outcome.hands {
//!         println!("{hand}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod manager;

pub use config::{DEFAULT_DEAL_DELAY_MS, DEFAULT_LOGIN_DELAY_MS, LobbyConfig};
pub use errors::{LobbyError, LobbyResult};
pub use manager::Lobby;
