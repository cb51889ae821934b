//! Configuration data models
//!
//! This module defines all configuration structures used by the engine.

pub mod catalog;
pub mod logging;
pub mod registry;
pub mod usage;

// Re-export all configuration types
pub use catalog::*;
pub use logging::*;
pub use registry::*;
pub use usage::*;

/// Default usage resolver timeout in milliseconds
pub fn default_usage_timeout_ms() -> u64 {
    2_000
}

/// Default maximum role name length
pub fn default_max_name_length() -> usize {
    100
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
