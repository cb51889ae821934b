//! Role lifecycle: delete, clone and default selection

use crate::utils::error::{Result, RoleAdminError};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::registry::RoleRegistry;
use super::types::{Role, name_key};

const MAX_CLONE_ATTEMPTS: usize = 64;
const MAX_CLEAR_ATTEMPTS: usize = 8;

impl RoleRegistry {
    /// Delete a custom role that nobody holds.
    ///
    /// The assignment count is read right before the version-conditioned
    /// delete; any count above zero or any resolver failure aborts.
    pub async fn delete_role(&self, id: &str) -> Result<()> {
        let role = self.store.get(id).await?;

        if role.is_system() {
            return Err(RoleAdminError::SystemRoleProtected(format!(
                "Cannot delete system role '{}'",
                role.name
            )));
        }
        if role.is_default {
            return Err(RoleAdminError::DefaultRoleProtected(format!(
                "Cannot delete default role '{}'",
                role.name
            )));
        }

        let count = self.count_assignments(&role).await.inspect_err(|e| {
            warn!("Delete of role {} blocked, usage unknown: {}", role.id, e);
        })?;
        if count > 0 {
            warn!(
                "Delete of role {} blocked, assigned to {} user(s)",
                role.id, count
            );
            return Err(RoleAdminError::role_in_use(&role.id, count));
        }

        self.store.delete(id, role.version).await?;
        info!("Role deleted: {} ({})", role.name, role.id);
        Ok(())
    }

    /// Copy a role into a new custom role named `"<name> (Copy)"`,
    /// `"<name> (Copy 2)"`, ... whichever is free first.
    ///
    /// The source part of the name is shortened when the suffix would push
    /// it past the length limit. A name taken by a concurrent writer between
    /// the listing and the insert is re-derived from a fresh listing.
    pub async fn clone_role(&self, id: &str) -> Result<Role> {
        let source = self.store.get(id).await?;

        for attempt in 1..=MAX_CLONE_ATTEMPTS {
            let taken: HashSet<String> = self
                .store
                .list()
                .await?
                .iter()
                .map(Role::name_key)
                .collect();
            let name = clone_name(&source.name, &taken, self.settings.max_name_length);
            let name = self.normalize_name(&name)?;

            let role = Role::custom(name, source.description.clone(), source.permissions.clone());
            match self.store.insert(role).await {
                Ok(role) => {
                    info!("Cloned role {} into {} ({})", source.id, role.name, role.id);
                    return Ok(role);
                }
                Err(RoleAdminError::Conflict(message)) => {
                    debug!(
                        "Clone of role {} lost a name race (attempt {}): {}",
                        source.id, attempt, message
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(RoleAdminError::Conflict(format!(
            "No free name for a copy of '{}' after {} attempts",
            source.name, MAX_CLONE_ATTEMPTS
        )))
    }

    /// Make `id` the only default role.
    ///
    /// The target is marked first, conditioned on the version just read, so
    /// a conflicting write leaves the previous default in place. Previous
    /// defaults are cleared afterwards. Calls are serialized per registry.
    pub async fn set_default_role(&self, id: &str) -> Result<Role> {
        let _guard = self.default_lock.lock().await;

        let target = self.store.get(id).await?;
        let role = if target.is_default {
            target
        } else {
            let version = target.version;
            let mut next = target;
            next.is_default = true;
            self.store.update(id, version, next).await?
        };

        for other in self.store.list().await? {
            if other.is_default && other.id != role.id {
                self.clear_default(other).await?;
            }
        }

        info!("Default role is now {} ({})", role.name, role.id);
        Ok(role)
    }

    /// Drop the default flag, re-reading the role when another write moved
    /// its version on.
    async fn clear_default(&self, mut role: Role) -> Result<()> {
        for _ in 0..MAX_CLEAR_ATTEMPTS {
            if !role.is_default {
                return Ok(());
            }

            let (role_id, version) = (role.id.clone(), role.version);
            let mut cleared = role;
            cleared.is_default = false;
            match self.store.update(&role_id, version, cleared).await {
                Ok(_) => return Ok(()),
                Err(RoleAdminError::VersionConflict { .. }) => {
                    debug!("Role {} changed while clearing default, re-reading", role_id);
                    role = self.store.get(&role_id).await?;
                }
                Err(RoleAdminError::NotFound(_)) => return Ok(()),
                Err(e) => return Err(e),
            }
        }

        Err(RoleAdminError::Conflict(format!(
            "Role {} kept changing while clearing its default flag",
            role.id
        )))
    }
}

/// First free `"<name> (Copy)"` / `"<name> (Copy n)"` variant no longer than
/// `max_len` characters. The source name is cut back to make room for the
/// suffix.
pub fn clone_name(source: &str, taken: &HashSet<String>, max_len: usize) -> String {
    let candidate = |suffix: String| {
        let room = max_len.saturating_sub(suffix.chars().count());
        let base: String = source.chars().take(room).collect();
        format!("{}{}", base.trim_end(), suffix)
    };

    std::iter::once(" (Copy)".to_string())
        .chain((2u64..).map(|n| format!(" (Copy {})", n)))
        .map(candidate)
        .find(|name| !taken.contains(&name_key(name)))
        .unwrap_or_else(|| candidate(" (Copy)".to_string()))
}
