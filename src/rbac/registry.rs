//! Role registry core
//!
//! The registry is the only writer of role records. It validates every
//! mutation against the catalog, consults the usage resolver before deletes
//! and writes through the role store.

use crate::config::{Config, RegistryConfig};
use crate::storage::{MemoryRoleStore, RoleStore};
use crate::usage::{AssignmentTable, HttpUsageResolver, UsageResolver};
use crate::utils::error::{Result, RoleAdminError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::catalog::PermissionCatalog;
use super::selection;
use super::types::{GroupStatus, Role, RoleUsage, RoleView, name_key};

/// Registry behaviour knobs
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Permission edits on system roles (name and description stay locked)
    pub allow_system_permission_edits: bool,
    /// Longest accepted role name, in characters
    pub max_name_length: usize,
    /// Upper bound for a single usage resolver call
    pub usage_timeout: Duration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self::new(&config.registry, config.usage.timeout())
    }
}

impl RegistrySettings {
    pub fn new(registry: &RegistryConfig, usage_timeout: Duration) -> Self {
        Self {
            allow_system_permission_edits: registry.allow_system_permission_edits,
            max_name_length: registry.max_name_length,
            usage_timeout,
        }
    }
}

/// Role registry
pub struct RoleRegistry {
    pub(super) catalog: Arc<PermissionCatalog>,
    pub(super) store: Arc<dyn RoleStore>,
    pub(super) usage: Arc<dyn UsageResolver>,
    pub(super) settings: RegistrySettings,
    /// Serializes default-role moves
    pub(super) default_lock: Mutex<()>,
    /// In-process assignment table when no usage endpoint is configured
    assignment_table: Option<Arc<AssignmentTable>>,
}

impl std::fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("permissions", &self.catalog.len())
            .field("groups", &self.catalog.groups().len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl RoleRegistry {
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        store: Arc<dyn RoleStore>,
        usage: Arc<dyn UsageResolver>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            catalog,
            store,
            usage,
            settings,
            default_lock: Mutex::new(()),
            assignment_table: None,
        }
    }

    /// Build a registry from configuration with an in-memory store.
    ///
    /// Uses the HTTP usage resolver when an endpoint is configured. Otherwise
    /// assignments are counted in an in-process table reachable through
    /// [`RoleRegistry::assignment_table`]; the host records assignments there
    /// so deletes of held roles stay blocked.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(MemoryRoleStore::new());

        match &config.usage.endpoint {
            Some(endpoint) => {
                let usage = HttpUsageResolver::new(endpoint, config.usage.timeout())?;
                Self::from_parts(config, store, Arc::new(usage)).await
            }
            None => {
                warn!("No usage endpoint configured, counting assignments in process");
                let table = Arc::new(AssignmentTable::new());
                let mut registry = Self::from_parts(config, store, table.clone()).await?;
                registry.assignment_table = Some(table);
                Ok(registry)
            }
        }
    }

    /// Build a registry from configuration with caller-supplied store and
    /// usage resolver (e.g. a callback resolver).
    pub async fn from_parts(
        config: &Config,
        store: Arc<dyn RoleStore>,
        usage: Arc<dyn UsageResolver>,
    ) -> Result<Self> {
        info!("Initializing role registry");
        config.validate()?;

        let catalog = Arc::new(PermissionCatalog::load(&config.catalog).await?);
        let registry = Self::new(catalog, store, usage, RegistrySettings::from(config));

        if config.registry.seed_system_roles {
            registry.seed_system_roles().await?;
        }

        info!("Role registry initialized successfully");
        Ok(registry)
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Assignment table backing usage checks, when the registry was built by
    /// [`RoleRegistry::from_config`] without a usage endpoint
    pub fn assignment_table(&self) -> Option<Arc<AssignmentTable>> {
        self.assignment_table.clone()
    }

    /// Insert the catalog's system roles that are not stored yet (matched by
    /// name). Returns how many were inserted.
    pub async fn seed_system_roles(&self) -> Result<usize> {
        let mut inserted = 0;

        for seed in self.catalog.system_roles() {
            if self.store.find_by_name(&seed.name).await?.is_some() {
                debug!("System role already present: {}", seed.name);
                continue;
            }

            let mut role = Role::system(
                seed.name.clone(),
                seed.description.clone(),
                seed.permissions.clone(),
            );
            role.is_default = seed.is_default;
            self.store.insert(role).await?;
            inserted += 1;
        }

        if inserted > 0 {
            info!("Seeded {} system roles", inserted);
        }
        Ok(inserted)
    }

    /// All roles
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.store.list().await
    }

    pub async fn get_role(&self, id: &str) -> Result<Role> {
        self.store.get(id).await
    }

    /// Case-insensitive name lookup
    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.store.find_by_name(name).await
    }

    /// Per-group tri-state for a stored role
    pub async fn group_summary(&self, id: &str) -> Result<Vec<GroupStatus>> {
        let role = self.store.get(id).await?;
        Ok(selection::group_summary(&role.permissions, self.catalog.groups()))
    }

    /// Role plus derived group states and assignment count. A failing usage
    /// resolver leaves `assignments` empty instead of failing the read.
    pub async fn describe_role(&self, id: &str) -> Result<RoleView> {
        let role = self.store.get(id).await?;
        let groups = selection::group_summary(&role.permissions, self.catalog.groups());
        let assignments = match self.count_assignments(&role).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Assignment count unavailable for role {}: {}", role.id, e);
                None
            }
        };

        Ok(RoleView {
            role,
            groups,
            assignments,
        })
    }

    /// Active assignments of a stored role
    pub async fn usage_count(&self, id: &str) -> Result<u64> {
        let role = self.store.get(id).await?;
        self.count_assignments(&role).await
    }

    /// Every role with its assignment count
    pub async fn list_roles_with_usage(&self) -> Result<Vec<RoleUsage>> {
        let roles = self.store.list().await?;
        let mut usage = Vec::with_capacity(roles.len());
        for role in roles {
            let assignments = self.count_assignments(&role).await?;
            usage.push(RoleUsage { role, assignments });
        }
        Ok(usage)
    }

    /// Usage resolver call bounded by the configured timeout
    pub(super) async fn count_assignments(&self, role: &Role) -> Result<u64> {
        match tokio::time::timeout(
            self.settings.usage_timeout,
            self.usage.count_assignments(role),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Usage resolver timed out after {:?} for role {}",
                    self.settings.usage_timeout, role.id
                );
                Err(RoleAdminError::UpstreamUnavailable(format!(
                    "Usage resolver timed out after {:?}",
                    self.settings.usage_timeout
                )))
            }
        }
    }

    /// Trim and length-check a role name
    pub(super) fn normalize_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoleAdminError::invalid_name("Role name cannot be empty"));
        }
        if name.chars().count() > self.settings.max_name_length {
            return Err(RoleAdminError::InvalidName(format!(
                "Role name exceeds {} characters",
                self.settings.max_name_length
            )));
        }
        Ok(name.to_string())
    }

    /// Fail with `InvalidName` if another role already uses `name`
    pub(super) async fn ensure_name_available(
        &self,
        name: &str,
        except_id: Option<&str>,
    ) -> Result<()> {
        let key = name_key(name);
        let taken = self
            .store
            .list()
            .await?
            .iter()
            .any(|role| Some(role.id.as_str()) != except_id && role.name_key() == key);

        if taken {
            return Err(RoleAdminError::InvalidName(format!(
                "Role name already in use: {}",
                name
            )));
        }
        Ok(())
    }
}

/// Surface store-level name collisions as the caller-facing name error
pub(super) fn name_conflict(error: RoleAdminError) -> RoleAdminError {
    match error {
        RoleAdminError::Conflict(message) => RoleAdminError::InvalidName(message),
        other => other,
    }
}
