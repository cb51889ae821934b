//! Role registry configuration

use super::{default_max_name_length, default_true};
use serde::{Deserialize, Serialize};

/// Role registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Allow permission edits on system roles (name and description stay locked)
    #[serde(default = "default_true")]
    pub allow_system_permission_edits: bool,
    /// Longest accepted role name, in characters
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Insert the catalog's system roles on startup
    #[serde(default = "default_true")]
    pub seed_system_roles: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_system_permission_edits: true,
            max_name_length: default_max_name_length(),
            seed_system_roles: true,
        }
    }
}
