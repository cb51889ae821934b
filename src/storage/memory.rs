//! In-memory role store

use crate::rbac::{Role, name_key};
use crate::utils::error::{Result, RoleAdminError};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::role_store::RoleStore;

#[derive(Debug, Default)]
struct StoreState {
    roles: HashMap<String, Role>,
    /// Ids in insertion order
    order: Vec<String>,
}

impl StoreState {
    fn name_taken(&self, name: &str, except_id: Option<&str>) -> bool {
        let key = name_key(name);
        self.roles
            .values()
            .any(|role| Some(role.id.as_str()) != except_id && role.name_key() == key)
    }

    fn current(&self, id: &str) -> Result<&Role> {
        self.roles
            .get(id)
            .ok_or_else(|| RoleAdminError::NotFound(format!("Role not found: {}", id)))
    }
}

/// Process-local store. Every operation takes the lock once, so each
/// read-check-write is atomic per record.
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    state: RwLock<StoreState>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().roles.is_empty()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn list(&self) -> Result<Vec<Role>> {
        let state = self.state.read();
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.roles.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Role> {
        self.state.read().current(id).cloned()
    }

    async fn insert(&self, mut role: Role) -> Result<Role> {
        let mut state = self.state.write();

        if state.roles.contains_key(&role.id) {
            return Err(RoleAdminError::Conflict(format!(
                "Role id already exists: {}",
                role.id
            )));
        }
        if state.name_taken(&role.name, None) {
            return Err(RoleAdminError::Conflict(format!(
                "Role name already exists: {}",
                role.name
            )));
        }

        let now = Utc::now();
        role.version = 1;
        role.created_at = now;
        role.updated_at = now;

        state.order.push(role.id.clone());
        state.roles.insert(role.id.clone(), role.clone());
        debug!("Stored role {} ({})", role.id, role.name);
        Ok(role)
    }

    async fn update(&self, id: &str, expected_version: u64, mut role: Role) -> Result<Role> {
        let mut state = self.state.write();

        let current = state.current(id)?;
        if current.version != expected_version {
            return Err(RoleAdminError::version_conflict(
                id,
                expected_version,
                current.version,
            ));
        }
        let (version, created_at) = (current.version, current.created_at);

        if state.name_taken(&role.name, Some(id)) {
            return Err(RoleAdminError::Conflict(format!(
                "Role name already exists: {}",
                role.name
            )));
        }

        role.id = id.to_string();
        role.version = version + 1;
        role.created_at = created_at;
        role.updated_at = Utc::now();

        state.roles.insert(role.id.clone(), role.clone());
        debug!("Updated role {} to version {}", role.id, role.version);
        Ok(role)
    }

    async fn delete(&self, id: &str, expected_version: u64) -> Result<()> {
        let mut state = self.state.write();

        let current = state.current(id)?;
        if current.version != expected_version {
            return Err(RoleAdminError::version_conflict(
                id,
                expected_version,
                current.version,
            ));
        }

        state.roles.remove(id);
        state.order.retain(|existing| existing != id);
        debug!("Removed role {}", id);
        Ok(())
    }
}
