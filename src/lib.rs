//! # role-admin
//!
//! Role and permission administration for multi-user business applications.
//!
//! ## Features
//!
//! - **Permission catalog**: Validated `resource:action` permissions grouped for presentation
//! - **Role registry**: Create, update, clone and delete roles with every invariant enforced
//! - **Group selection**: Tri-state select-all / deselect-all over permission groups
//! - **Usage-guarded deletion**: Roles held by active users cannot be removed
//! - **Optimistic versioning**: Stale edits fail instead of silently overwriting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use role_admin::{Config, RoleRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/role_admin.yaml").await?;
//!     role_admin::init_logging(&config.logging)?;
//!
//!     let registry = RoleRegistry::from_config(&config).await?;
//!     let billing = registry.catalog().group("Billing").map(|g| g.permissions.clone());
//!
//!     let role = registry
//!         .create_role("Associate", "Junior lawyer", ["matters:view"])
//!         .await?;
//!     if let Some(billing) = billing {
//!         let toggle = registry.toggle_group(&role.id, &billing).await?;
//!         println!("{} -> {:?}", toggle.role.name, toggle.state);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod rbac;
pub mod storage;
pub mod usage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use rbac::{
    GroupAction, GroupState, GroupStatus, GroupToggle, Permission, PermissionCatalog,
    PermissionGroup, RegistrySettings, Role, RolePatch, RoleRegistry, RoleType, RoleUsage,
    RoleView, Scope,
};
pub use storage::{MemoryRoleStore, RoleStore};
pub use usage::{AssignmentTable, CallbackUsageResolver, HttpUsageResolver, UsageResolver};
pub use utils::error::{ErrorCategory, Result, RoleAdminError};
pub use utils::logging::init_logging;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
