//! Utility modules for the role administration engine
//!
//! - **error**: Error types and classification
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging

pub use error::{ErrorCategory, Result, RoleAdminError};
pub use logging::init_logging;
