//! Usage, registry and logging validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Longest timeout accepted for a single usage lookup
const MAX_USAGE_TIMEOUT_MS: u64 = 60_000;

impl Validate for UsageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating usage resolver configuration");

        if let Some(endpoint) = &self.endpoint {
            let url = url::Url::parse(endpoint)
                .map_err(|e| format!("Invalid usage endpoint '{}': {}", endpoint, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "Usage endpoint must use http or https, got '{}'",
                    url.scheme()
                ));
            }
        }

        if self.timeout_ms == 0 {
            return Err("Usage timeout must be greater than 0".to_string());
        }

        if self.timeout_ms > MAX_USAGE_TIMEOUT_MS {
            return Err(format!(
                "Usage timeout should not exceed {} ms",
                MAX_USAGE_TIMEOUT_MS
            ));
        }

        Ok(())
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_name_length == 0 {
            return Err("Maximum role name length must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log filter '{}': {}", self.level, e))
    }
}
