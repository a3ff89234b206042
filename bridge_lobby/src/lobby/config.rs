//! Lobby configuration.

use crate::{storage::StorageConfig, table::RegistryConfig};
use std::time::Duration;

/// Default cosmetic delay before a login completes, in milliseconds
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

/// Default cosmetic delay before a deal completes, in milliseconds
pub const DEFAULT_DEAL_DELAY_MS: u64 = 300;

/// Everything needed to assemble a [`Lobby`](super::Lobby)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    pub storage: StorageConfig,
    pub registry: RegistryConfig,
    pub login_delay: Duration,
    pub deal_delay: Duration,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            registry: RegistryConfig::default(),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            deal_delay: Duration::from_millis(DEFAULT_DEAL_DELAY_MS),
        }
    }
}

impl LobbyConfig {
    /// No cosmetic delays; used by tests and scripted sessions
    pub fn instant() -> Self {
        Self {
            login_delay: Duration::ZERO,
            deal_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
