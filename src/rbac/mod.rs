//! Role and permission administration
//!
//! The permission catalog, the group selection algorithm and the role
//! registry that enforces every role invariant.

mod catalog;
mod defaults;
mod lifecycle;
mod registry;
mod roles;
pub mod selection;
mod types;

// Re-export public types and structs
pub use catalog::{PermissionCatalog, SystemRoleSeed};
pub use defaults::builtin_catalog;
pub use lifecycle::clone_name;
pub use registry::{RegistrySettings, RoleRegistry};
pub use types::{
    GroupAction, GroupState, GroupStatus, GroupToggle, Permission, PermissionGroup, Role,
    RolePatch, RoleType, RoleUsage, RoleView, Scope, name_key,
};
