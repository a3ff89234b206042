//! Authentication module providing a mock identity provider.
//!
//! Any non-blank username and password are accepted. The logged-in user is
//! persisted so a restarted client resumes the session, and the username
//! `admin` (any letter case) is granted admin rights.
//!
//! ## Example
//!
//! ```
//! use bridge_lobby::auth::{AuthManager, IdentityProvider, LoginRequest};
//! use bridge_lobby::storage::MemoryStore;
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut auth = AuthManager::new(
//!         Arc::new(MemoryStore::new()),
//!         "bridge_current_user",
//!         Duration::ZERO,
//!     );
//!
//!     let user = auth.login(LoginRequest::new("alice", "secret")).await?;
//!     println!("Logged in as {}", user.username);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use manager::{AuthManager, IdentityProvider};
pub use models::{LoginRequest, User};
