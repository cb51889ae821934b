//! Error handling for the role administration engine
//!
//! Every rejected mutation surfaces a typed error so callers can tell
//! "fix your input" apart from "try again".

mod helpers;
mod types;

pub use helpers::ErrorCategory;
pub use types::{Result, RoleAdminError};
