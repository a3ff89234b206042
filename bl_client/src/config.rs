//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bridge_lobby::{
    LobbyConfig,
    lobby::{DEFAULT_DEAL_DELAY_MS, DEFAULT_LOGIN_DELAY_MS},
    storage::StorageConfig,
    table::RegistryConfig,
};
use std::{path::PathBuf, time::Duration};

/// Longest cosmetic delay accepted, in milliseconds
const MAX_DELAY_MS: u64 = 10_000;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Storage, registry and delay settings handed to the lobby
    pub lobby: LobbyConfig,
    /// Username to log in with on startup
    pub username: Option<String>,
    /// Password to log in with on startup
    pub password: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_dir_override` - Optional data directory override (from CLI args)
    /// * `username` - Optional startup username (from CLI args)
    /// * `password` - Optional startup password (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ClientConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if a value is out of range
    pub fn from_env(
        data_dir_override: Option<PathBuf>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut storage = StorageConfig::from_env();
        if let Some(dir) = data_dir_override {
            storage.data_dir = dir;
        }

        let registry_defaults = RegistryConfig::default();
        let registry = RegistryConfig {
            seed_sample_tables: parse_env_or(
                "BRIDGE_SEED_TABLES",
                registry_defaults.seed_sample_tables,
            ),
            max_name_length: parse_env_or(
                "BRIDGE_MAX_TABLE_NAME_LENGTH",
                registry_defaults.max_name_length,
            ),
        };

        let login_delay_ms = parse_env_or("BRIDGE_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS);
        let deal_delay_ms = parse_env_or("BRIDGE_DEAL_DELAY_MS", DEFAULT_DEAL_DELAY_MS);

        let config = Self {
            lobby: LobbyConfig {
                storage,
                registry,
                login_delay: Duration::from_millis(login_delay_ms),
                deal_delay: Duration::from_millis(deal_delay_ms),
            },
            username,
            password,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(reason) = self.lobby.registry.validate() {
            return Err(ConfigError::Invalid {
                var: "BRIDGE_MAX_TABLE_NAME_LENGTH".to_string(),
                reason,
            });
        }

        for (var, delay) in [
            ("BRIDGE_LOGIN_DELAY_MS", self.lobby.login_delay),
            ("BRIDGE_DEAL_DELAY_MS", self.lobby.deal_delay),
        ] {
            if delay > Duration::from_millis(MAX_DELAY_MS) {
                return Err(ConfigError::Invalid {
                    var: var.to_string(),
                    reason: format!("Must be at most {MAX_DELAY_MS} ms"),
                });
            }
        }

        if self.lobby.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "BRIDGE_DATA_DIR".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(ConfigError::MissingRequired {
                var: "--username".to_string(),
                hint: "Pass --username together with --password".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required option: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
