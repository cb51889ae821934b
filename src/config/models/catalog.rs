//! Permission catalog configuration

use crate::rbac::Scope;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the permission catalog comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Catalog compiled into the crate
    #[default]
    Builtin,
    /// YAML file on disk
    Path,
    /// Definition embedded in the configuration itself
    Inline,
}

/// Permission catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,
    /// Catalog file, required when `source = path`
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Catalog body, required when `source = inline`
    #[serde(default)]
    pub inline: Option<CatalogDefinition>,
}

impl CatalogConfig {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CatalogSource::Path,
            path: Some(path.into()),
            inline: None,
        }
    }

    pub fn inline(definition: CatalogDefinition) -> Self {
        Self {
            source: CatalogSource::Inline,
            path: None,
            inline: Some(definition),
        }
    }
}

/// Raw catalog as written in YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub permissions: Vec<PermissionDefinition>,
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    #[serde(default)]
    pub system_roles: Vec<SystemRoleDefinition>,
}

/// One permission entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    /// `resource:action`
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
}

impl PermissionDefinition {
    pub fn new(id: impl Into<String>, scope: Scope, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scope,
            description: description.into(),
        }
    }
}

/// One permission group entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub permissions: Vec<String>,
}

/// Wildcard accepted in `SystemRoleDefinition::permissions`
pub const ALL_PERMISSIONS: &str = "*";

/// System role seeded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRoleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Permission ids, or `["*"]` for every permission in the catalog
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}
