//! Usage resolver configuration

use super::default_usage_timeout_ms;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Usage resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    /// Base URL of the assignment service. Without it the in-process
    /// assignment table (or an injected callback) answers.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Upper bound for a single count lookup
    #[serde(default = "default_usage_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_usage_timeout_ms(),
        }
    }
}

impl UsageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
