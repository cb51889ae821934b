//! Configuration management for the role administration engine
//!
//! This module handles loading and validation of the engine configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, RoleAdminError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the catalog YAML file
pub const ENV_CATALOG_PATH: &str = "ROLE_ADMIN_CATALOG_PATH";
/// Environment variable holding the usage resolver base URL
pub const ENV_USAGE_ENDPOINT: &str = "ROLE_ADMIN_USAGE_ENDPOINT";
/// Environment variable holding the usage resolver timeout in milliseconds
pub const ENV_USAGE_TIMEOUT_MS: &str = "ROLE_ADMIN_USAGE_TIMEOUT_MS";
/// Environment variable holding the log filter
pub const ENV_LOG_LEVEL: &str = "ROLE_ADMIN_LOG_LEVEL";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Permission catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Usage resolver endpoint and timeout
    #[serde(default)]
    pub usage: UsageConfig,
    /// Registry behaviour
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RoleAdminError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| RoleAdminError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Ok(path) = std::env::var(ENV_CATALOG_PATH) {
            config.catalog = CatalogConfig::from_path(path);
        }

        if let Ok(endpoint) = std::env::var(ENV_USAGE_ENDPOINT) {
            config.usage.endpoint = Some(endpoint);
        }

        if let Ok(timeout) = std::env::var(ENV_USAGE_TIMEOUT_MS) {
            config.usage.timeout_ms = timeout.parse().map_err(|e| {
                RoleAdminError::Config(format!("Invalid {}: {}", ENV_USAGE_TIMEOUT_MS, e))
            })?;
        }

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.catalog
            .validate()
            .map_err(|e| RoleAdminError::Config(format!("Catalog config error: {}", e)))?;

        self.usage
            .validate()
            .map_err(|e| RoleAdminError::Config(format!("Usage config error: {}", e)))?;

        self.registry
            .validate()
            .map_err(|e| RoleAdminError::Config(format!("Registry config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| RoleAdminError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RoleAdminError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
