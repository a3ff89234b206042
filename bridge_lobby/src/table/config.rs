//! Table registry configuration models.

use crate::game::constants::MAX_TABLE_NAME_LENGTH;
use serde::{Deserialize, Serialize};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Seed sample tables when no registry has been persisted yet
    pub seed_sample_tables: bool,

    /// Longest accepted table name, in characters (default: 64)
    pub max_name_length: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_sample_tables: true,
            max_name_length: MAX_TABLE_NAME_LENGTH,
        }
    }
}

impl RegistryConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_name_length == 0 || self.max_name_length > 256 {
            return Err("Max table name length must be between 1 and 256".to_string());
        }

        Ok(())
    }
}
