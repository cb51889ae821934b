//! Permission catalog
//!
//! The immutable universe of permissions and their presentation groups,
//! loaded once at startup. Any inconsistency in the definition is fatal.

use crate::config::{
    ALL_PERMISSIONS, CatalogConfig, CatalogDefinition, CatalogSource, SystemRoleDefinition,
};
use crate::utils::error::{Result, RoleAdminError};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use super::defaults;
use super::types::{Permission, PermissionGroup, Scope, name_key};

/// System role after wildcard expansion and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRoleSeed {
    pub name: String,
    pub description: String,
    pub permissions: BTreeSet<String>,
    pub is_default: bool,
}

/// Validated permission catalog
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    /// Permissions in declaration order
    permissions: Vec<Permission>,
    /// Permission id -> position in `permissions`
    index: HashMap<String, usize>,
    groups: Vec<PermissionGroup>,
    system_roles: Vec<SystemRoleSeed>,
}

impl PermissionCatalog {
    /// Catalog compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_definition(defaults::builtin_catalog())
    }

    /// Load the catalog named by the configuration
    pub async fn load(config: &CatalogConfig) -> Result<Self> {
        match config.source {
            CatalogSource::Builtin => Self::builtin(),
            CatalogSource::Path => {
                let path = config.path.as_deref().ok_or_else(|| {
                    RoleAdminError::config("Catalog path is required when source is 'path'")
                })?;
                Self::from_file(path).await
            }
            CatalogSource::Inline => {
                let definition = config.inline.clone().ok_or_else(|| {
                    RoleAdminError::config("Inline catalog is required when source is 'inline'")
                })?;
                Self::from_definition(definition)
            }
        }
    }

    /// Load a catalog from a YAML file
    pub async fn from_file(path: &Path) -> Result<Self> {
        info!("Loading permission catalog from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RoleAdminError::Config(format!("Failed to read catalog file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let definition: CatalogDefinition = serde_yaml::from_str(content)
            .map_err(|e| RoleAdminError::Config(format!("Failed to parse catalog: {}", e)))?;

        Self::from_definition(definition)
    }

    /// Build and validate a catalog
    pub fn from_definition(definition: CatalogDefinition) -> Result<Self> {
        if definition.permissions.is_empty() {
            return Err(RoleAdminError::config(
                "Permission catalog must define at least one permission",
            ));
        }

        let mut permissions = Vec::with_capacity(definition.permissions.len());
        let mut index = HashMap::with_capacity(definition.permissions.len());

        for entry in definition.permissions {
            let permission = parse_permission(&entry.id, entry.scope, entry.description)?;
            if index.contains_key(&permission.id) {
                return Err(RoleAdminError::Config(format!(
                    "Duplicate permission id in catalog: {}",
                    permission.id
                )));
            }
            index.insert(permission.id.clone(), permissions.len());
            permissions.push(permission);
        }

        let mut group_names = HashSet::new();
        let mut groups = Vec::with_capacity(definition.groups.len());
        for group in definition.groups {
            if group.name.trim().is_empty() {
                return Err(RoleAdminError::config("Permission group name cannot be empty"));
            }
            if !group_names.insert(name_key(&group.name)) {
                return Err(RoleAdminError::Config(format!(
                    "Duplicate permission group: {}",
                    group.name
                )));
            }
            if let Some(unknown) = group.permissions.iter().find(|id| !index.contains_key(*id)) {
                return Err(RoleAdminError::Config(format!(
                    "Group '{}' references unknown permission: {}",
                    group.name, unknown
                )));
            }
            groups.push(PermissionGroup {
                name: group.name,
                description: group.description,
                permissions: group.permissions,
            });
        }

        let mut catalog = Self {
            permissions,
            index,
            groups,
            system_roles: Vec::new(),
        };
        catalog.system_roles = catalog.expand_system_roles(definition.system_roles)?;

        debug!(
            "Permission catalog loaded: {} permissions, {} groups, {} system roles",
            catalog.permissions.len(),
            catalog.groups.len(),
            catalog.system_roles.len()
        );
        Ok(catalog)
    }

    fn expand_system_roles(
        &self,
        definitions: Vec<SystemRoleDefinition>,
    ) -> Result<Vec<SystemRoleSeed>> {
        let mut names = HashSet::new();
        let mut seeds = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let name = definition.name.trim().to_string();
            if name.is_empty() {
                return Err(RoleAdminError::config("System role name cannot be empty"));
            }
            if !names.insert(name_key(&name)) {
                return Err(RoleAdminError::Config(format!(
                    "Duplicate system role: {}",
                    name
                )));
            }

            let permissions = if definition.permissions.iter().any(|p| p == ALL_PERMISSIONS) {
                self.all_ids()
            } else {
                self.validate_ids(&definition.permissions).map_err(|e| {
                    RoleAdminError::Config(format!("System role '{}': {}", name, e))
                })?
            };

            seeds.push(SystemRoleSeed {
                name,
                description: definition.description,
                permissions,
                is_default: definition.is_default,
            });
        }

        if seeds.iter().filter(|seed| seed.is_default).count() > 1 {
            return Err(RoleAdminError::config(
                "At most one system role may be marked as default",
            ));
        }

        Ok(seeds)
    }

    /// All known permissions, in declaration order
    pub fn all_permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Every permission id as a set
    pub fn all_ids(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Presentation groups, in declaration order
    pub fn groups(&self) -> &[PermissionGroup] {
        &self.groups
    }

    /// System roles declared by the catalog
    pub fn system_roles(&self) -> &[SystemRoleSeed] {
        &self.system_roles
    }

    /// Membership test
    pub fn is_valid(&self, permission_id: &str) -> bool {
        self.index.contains_key(permission_id)
    }

    pub fn get(&self, permission_id: &str) -> Option<&Permission> {
        self.index.get(permission_id).map(|&i| &self.permissions[i])
    }

    /// Group lookup by name, case-insensitive
    pub fn group(&self, name: &str) -> Option<&PermissionGroup> {
        let key = name_key(name);
        self.groups.iter().find(|group| name_key(&group.name) == key)
    }

    pub fn permissions_for_resource(&self, resource: &str) -> Vec<&Permission> {
        self.permissions
            .iter()
            .filter(|permission| permission.resource == resource)
            .collect()
    }

    /// Distinct resources, in first-seen order
    pub fn resources(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.permissions
            .iter()
            .map(|permission| permission.resource.as_str())
            .filter(|resource| seen.insert(*resource))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Check every id against the catalog and collapse duplicates.
    ///
    /// Fails on the first unknown id in input order; nothing is applied
    /// partially.
    pub fn validate_ids<I, S>(&self, ids: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for id in ids {
            let id = id.as_ref();
            if !self.is_valid(id) {
                return Err(RoleAdminError::unknown_permission(id));
            }
            set.insert(id.to_string());
        }
        Ok(set)
    }
}

/// Split `resource:action` into a permission value
fn parse_permission(id: &str, scope: Scope, description: String) -> Result<Permission> {
    let malformed = || {
        RoleAdminError::Config(format!(
            "Malformed permission id '{}', expected 'resource:action'",
            id
        ))
    };

    let (resource, action) = id.split_once(':').ok_or_else(malformed)?;
    if resource.is_empty() || action.is_empty() || action.contains(':') || id.trim() != id {
        return Err(malformed());
    }

    Ok(Permission {
        id: id.to_string(),
        resource: resource.to_string(),
        action: action.to_string(),
        scope,
        description,
    })
}
