//! Role authoring: create, update and permission toggles

use crate::utils::error::{Result, RoleAdminError};
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::registry::{RoleRegistry, name_conflict};
use super::selection::{self, Selection};
use super::types::{GroupAction, GroupToggle, Role, RolePatch};

impl RoleRegistry {
    /// Create a custom role.
    ///
    /// Duplicate permission ids collapse silently; the first unknown id
    /// aborts the whole operation.
    pub async fn create_role<I, S>(
        &self,
        name: &str,
        description: &str,
        permission_ids: I,
    ) -> Result<Role>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = self.normalize_name(name)?;
        self.ensure_name_available(&name, None).await?;
        let permissions = self.catalog.validate_ids(permission_ids)?;

        info!("Creating role: {}", name);
        let role = Role::custom(name, description.to_string(), permissions);
        let role = self.store.insert(role).await.map_err(name_conflict)?;

        info!("Role created successfully: {} ({})", role.name, role.id);
        Ok(role)
    }

    /// Apply a partial update.
    ///
    /// `permissions`, when present, replaces the whole set. System roles
    /// reject any change to name or description.
    pub async fn update_role(&self, id: &str, patch: RolePatch) -> Result<Role> {
        let current = self.store.get(id).await?;
        let expected = check_version(&current, patch.expected_version)?;
        let mut next = current.clone();

        if let Some(name) = patch.name.as_deref() {
            if current.is_system() && name.trim() != current.name {
                return Err(RoleAdminError::SystemRoleImmutable(format!(
                    "Cannot rename system role '{}'",
                    current.name
                )));
            }
            let name = self.normalize_name(name)?;
            if name != current.name {
                self.ensure_name_available(&name, Some(id)).await?;
            }
            next.name = name;
        }

        if let Some(description) = patch.description {
            if current.is_system() && description != current.description {
                return Err(RoleAdminError::SystemRoleImmutable(format!(
                    "Cannot change description of system role '{}'",
                    current.name
                )));
            }
            next.description = description;
        }

        if let Some(permission_ids) = patch.permissions.as_ref() {
            let permissions = self.catalog.validate_ids(permission_ids)?;
            self.ensure_permissions_editable(&current, &permissions)?;
            next.permissions = permissions;
        }

        if next == current {
            debug!("Update of role {} changes nothing", id);
            return Ok(current);
        }

        info!("Updating role: {} ({})", current.name, id);
        self.store
            .update(id, expected, next)
            .await
            .map_err(name_conflict)
    }

    /// Toggle a whole permission group on the stored role.
    ///
    /// Fully selected groups are cleared; partially or un-selected groups
    /// are filled in. The resulting tri-state is returned with the role.
    pub async fn toggle_group<I, S>(&self, id: &str, group_permission_ids: I) -> Result<GroupToggle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_group(id, None, group_permission_ids, None).await
    }

    /// `toggle_group` pinned to the version the caller last read
    pub async fn toggle_group_at<I, S>(
        &self,
        id: &str,
        expected_version: u64,
        group_permission_ids: I,
    ) -> Result<GroupToggle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_group(id, Some(expected_version), group_permission_ids, None)
            .await
    }

    /// Force a group fully selected or fully cleared
    pub async fn set_group<I, S>(
        &self,
        id: &str,
        group_permission_ids: I,
        selected: bool,
    ) -> Result<GroupToggle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_group(id, None, group_permission_ids, Some(selected))
            .await
    }

    /// Flip one permission on the stored role
    pub async fn toggle_permission(&self, id: &str, permission_id: &str) -> Result<Role> {
        if !self.catalog.is_valid(permission_id) {
            return Err(RoleAdminError::unknown_permission(permission_id));
        }

        let current = self.store.get(id).await?;
        let permissions = selection::toggle_permission(&current.permissions, permission_id);
        self.ensure_permissions_editable(&current, &permissions)?;

        let version = current.version;
        let mut next = current;
        next.permissions = permissions;

        debug!("Toggling permission {} on role {}", permission_id, id);
        self.store.update(id, version, next).await
    }

    async fn apply_group<I, S>(
        &self,
        id: &str,
        expected_version: Option<u64>,
        group_permission_ids: I,
        force: Option<bool>,
    ) -> Result<GroupToggle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group: Vec<String> = self
            .catalog
            .validate_ids(group_permission_ids)?
            .into_iter()
            .collect();

        let current = self.store.get(id).await?;
        let expected = check_version(&current, expected_version)?;

        let Selection {
            permissions,
            state,
            action,
        } = match force {
            Some(selected) => selection::set_group(&current.permissions, &group, selected),
            None => selection::toggle_group(&current.permissions, &group),
        };

        if action == GroupAction::Unchanged {
            return Ok(GroupToggle {
                role: current,
                state,
                action,
            });
        }

        self.ensure_permissions_editable(&current, &permissions)?;

        let mut next = current;
        next.permissions = permissions;
        let role = self.store.update(id, expected, next).await?;

        info!(
            "Group {:?} on role {} ({} permissions), now {:?}",
            action,
            role.id,
            group.len(),
            state
        );
        Ok(GroupToggle {
            role,
            state,
            action,
        })
    }

    fn ensure_permissions_editable(&self, role: &Role, next: &BTreeSet<String>) -> Result<()> {
        if role.is_system() && !self.settings.allow_system_permission_edits && *next != role.permissions
        {
            return Err(RoleAdminError::SystemRoleImmutable(format!(
                "Permissions of system role '{}' are locked",
                role.name
            )));
        }
        Ok(())
    }
}

/// Resolve the version a write is conditioned on, failing early when the
/// caller's snapshot is already stale.
pub(super) fn check_version(current: &Role, expected: Option<u64>) -> Result<u64> {
    match expected {
        Some(version) if version != current.version => Err(RoleAdminError::version_conflict(
            &current.id,
            version,
            current.version,
        )),
        _ => Ok(current.version),
    }
}
