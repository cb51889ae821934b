//! Helper functions for creating and classifying errors

use super::types::RoleAdminError;

/// Coarse classification used by admin front-ends to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input; retrying without changes will fail again
    Validation,
    /// Operation refused to protect a system or default role
    Protected,
    /// Record is missing
    NotFound,
    /// Uniqueness violated at the store
    Conflict,
    /// Re-fetch state and retry
    Retryable,
    /// Configuration or IO problem
    Internal,
}

impl RoleAdminError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_name<S: Into<String>>(message: S) -> Self {
        Self::InvalidName(message.into())
    }

    pub fn unknown_permission<S: Into<String>>(permission_id: S) -> Self {
        Self::UnknownPermission(permission_id.into())
    }

    pub fn system_role_immutable<S: Into<String>>(message: S) -> Self {
        Self::SystemRoleImmutable(message.into())
    }

    pub fn system_role_protected<S: Into<String>>(message: S) -> Self {
        Self::SystemRoleProtected(message.into())
    }

    pub fn default_role_protected<S: Into<String>>(message: S) -> Self {
        Self::DefaultRoleProtected(message.into())
    }

    pub fn role_in_use<S: Into<String>>(role_id: S, count: u64) -> Self {
        Self::RoleInUse {
            role_id: role_id.into(),
            count,
        }
    }

    pub fn version_conflict<S: Into<String>>(role_id: S, expected: u64, actual: u64) -> Self {
        Self::VersionConflict {
            role_id: role_id.into(),
            expected,
            actual,
        }
    }

    pub fn upstream_unavailable<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether the caller may retry after re-reading state
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::VersionConflict { .. } | Self::UpstreamUnavailable(_)
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName(_) | Self::UnknownPermission(_) | Self::RoleInUse { .. } => {
                ErrorCategory::Validation
            }
            Self::SystemRoleImmutable(_)
            | Self::SystemRoleProtected(_)
            | Self::DefaultRoleProtected(_) => ErrorCategory::Protected,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::VersionConflict { .. } | Self::UpstreamUnavailable(_) => {
                ErrorCategory::Retryable
            }
            Self::Config(_) => ErrorCategory::Internal,
        }
    }
}
