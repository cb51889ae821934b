//! RBAC type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Scope attached to a permission.
///
/// Carried through to callers, never interpreted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only records owned by the principal
    #[serde(rename = "self")]
    Own,
    /// Records of the principal's team
    Team,
    /// Organization-wide
    #[default]
    Org,
    /// Any other scope tag supplied by the catalog
    #[serde(untagged)]
    Other(String),
}

/// Permission definition, parsed once when the catalog is loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// `resource:action` identifier
    pub id: String,
    /// Resource this permission applies to
    pub resource: String,
    /// Action this permission allows
    pub action: String,
    /// Opaque scope
    pub scope: Scope,
    /// Human-readable description
    pub description: String,
}

/// Named bundle of permission ids used for bulk selection and display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

/// Origin of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Seeded from the catalog; identity fields are immutable
    System,
    /// Authored by an administrator
    Custom,
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Display name, unique case-insensitively
    pub name: String,
    /// Role description
    pub description: String,
    /// System or custom
    #[serde(rename = "type")]
    pub role_type: RoleType,
    /// Permission ids granted by this role
    pub permissions: BTreeSet<String>,
    /// Role handed to new principals
    pub is_default: bool,
    /// Optimistic concurrency token, bumped by the store on every write
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Build a fresh custom role with a new id
    pub fn custom(name: String, description: String, permissions: BTreeSet<String>) -> Self {
        Self::with_type(RoleType::Custom, name, description, permissions)
    }

    /// Build a fresh system role with a new id
    pub fn system(name: String, description: String, permissions: BTreeSet<String>) -> Self {
        Self::with_type(RoleType::System, name, description, permissions)
    }

    fn with_type(
        role_type: RoleType,
        name: String,
        description: String,
        permissions: BTreeSet<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            role_type,
            permissions,
            is_default: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_system(&self) -> bool {
        self.role_type == RoleType::System
    }

    pub fn has_permission(&self, permission_id: &str) -> bool {
        self.permissions.contains(permission_id)
    }

    /// Key used for case-insensitive name comparisons
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Lowercased form of a role name used for uniqueness checks
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Partial update for a role. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Full replacement of the permission set, not a merge
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    /// Version the caller last read; the update fails if the role moved on
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl RolePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.permissions.is_none()
    }
}

/// Relationship between a role's permissions and a group (tri-state checkbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupState {
    /// Every group permission is granted
    All,
    /// At least one, but not every, group permission is granted
    Some,
    /// No group permission is granted
    None,
}

/// What a group operation did to the permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupAction {
    Selected,
    Deselected,
    Unchanged,
}

/// Tri-state summary of one group for a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatus {
    pub name: String,
    pub state: GroupState,
    /// Distinct group permissions the role holds
    pub selected: usize,
    /// Distinct permissions in the group
    pub total: usize,
}

/// Result of a group toggle on a stored role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupToggle {
    pub role: Role,
    /// State of the group against the resulting permission set
    pub state: GroupState,
    pub action: GroupAction,
}

/// Role plus derived presentation data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub role: Role,
    pub groups: Vec<GroupStatus>,
    /// Active assignments; `None` when the usage resolver could not answer
    pub assignments: Option<u64>,
}

/// Role with its assignment count, as shown on role cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUsage {
    pub role: Role,
    pub assignments: u64,
}
