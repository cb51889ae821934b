//! Error types for the role administration engine

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, RoleAdminError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum RoleAdminError {
    /// Role (or other keyed record) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Role name is empty, too long or already taken
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Permission id is not part of the catalog
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Attempt to change the identity fields of a system role
    #[error("System role is immutable: {0}")]
    SystemRoleImmutable(String),

    /// Attempt to delete a system role
    #[error("System role is protected: {0}")]
    SystemRoleProtected(String),

    /// Attempt to delete the default role
    #[error("Default role is protected: {0}")]
    DefaultRoleProtected(String),

    /// Role still has active assignments
    #[error("Role {role_id} is assigned to {count} user(s)")]
    RoleInUse { role_id: String, count: u64 },

    /// Optimistic concurrency check failed
    #[error("Version conflict on role {role_id}: expected {expected}, found {actual}")]
    VersionConflict {
        role_id: String,
        expected: u64,
        actual: u64,
    },

    /// Usage resolver could not be reached or timed out
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Store-level uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}
