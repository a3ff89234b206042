//! Storage configuration module.
//!
//! Provides the data directory and the keys each persisted record lives under.

use std::{env, path::PathBuf};

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory used by the file-backed store
    pub data_dir: PathBuf,

    /// Key of the persisted table registry
    pub tables_key: String,

    /// Key of the persisted session selection
    pub selection_key: String,

    /// Key of the persisted logged-in user
    pub user_key: String,

    /// Key of the last deck color used for a deal
    pub deck_color_key: String,
}

impl StorageConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - `BRIDGE_DATA_DIR`: Directory for the file store (default: `.bridge_lobby`)
    /// - `BRIDGE_TABLES_KEY`: Registry key (default: `bridge_tables`)
    /// - `BRIDGE_SELECTION_KEY`: Selection key (default: `bridge_current_selection`)
    /// - `BRIDGE_USER_KEY`: Current user key (default: `bridge_current_user`)
    /// - `BRIDGE_DECK_COLOR_KEY`: Deck color key (default: `lastDeckColor`)
    ///
    /// # Returns
    ///
    /// * `StorageConfig` - Configuration from environment
    pub fn from_env() -> Self {
        let defaults = Self::development();
        Self {
            data_dir: env::var("BRIDGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            tables_key: env::var("BRIDGE_TABLES_KEY").unwrap_or(defaults.tables_key),
            selection_key: env::var("BRIDGE_SELECTION_KEY").unwrap_or(defaults.selection_key),
            user_key: env::var("BRIDGE_USER_KEY").unwrap_or(defaults.user_key),
            deck_color_key: env::var("BRIDGE_DECK_COLOR_KEY").unwrap_or(defaults.deck_color_key),
        }
    }

    /// Create a default configuration for development
    ///
    /// Uses `.bridge_lobby` in the working directory as the data directory
    pub fn development() -> Self {
        Self {
            data_dir: PathBuf::from(".bridge_lobby"),
            tables_key: "bridge_tables".to_string(),
            selection_key: "bridge_current_selection".to_string(),
            user_key: "bridge_current_user".to_string(),
            deck_color_key: "lastDeckColor".to_string(),
        }
    }

    /// Same keys as [`StorageConfig::development`], rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::development()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::development()
    }
}
