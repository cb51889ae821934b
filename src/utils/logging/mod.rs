//! Logging setup
//!
//! Installs a `tracing` subscriber driven by [`LoggingConfig`]. `RUST_LOG`
//! takes precedence over the configured level when it is set.

use crate::config::LoggingConfig;
use crate::utils::error::{Result, RoleAdminError};
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, preferring `RUST_LOG` from the environment
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            RoleAdminError::Config(format!("Invalid log filter '{}': {}", config.level, e))
        }),
    }
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber is already installed (tests,
/// embedding hosts) and leaves it in place.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!("Logging initialized at level: {}", config.level);
    }
    Ok(installed)
}
