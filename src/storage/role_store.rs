//! Role persistence interface

use crate::rbac::Role;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable CRUD for role records, keyed by id with a case-insensitive
/// uniqueness constraint on name.
///
/// Writes are conditioned on the version the caller last read. The store
/// bumps `version` and `updated_at` on every successful write.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// All roles, in insertion order
    async fn list(&self) -> Result<Vec<Role>>;

    /// Fails with `NotFound`
    async fn get(&self, id: &str) -> Result<Role>;

    /// Fails with `Conflict` when the id or name is taken. The stored role
    /// starts at version 1.
    async fn insert(&self, role: Role) -> Result<Role>;

    /// Replace a role. Fails with `NotFound`, `VersionConflict`, or
    /// `Conflict` when the new name collides with another role.
    async fn update(&self, id: &str, expected_version: u64, role: Role) -> Result<Role>;

    /// Remove a role. Fails with `NotFound` or `VersionConflict`.
    async fn delete(&self, id: &str, expected_version: u64) -> Result<()>;

    /// Case-insensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let key = crate::rbac::name_key(name);
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|role| role.name_key() == key))
    }
}
