//! In-process assignment table

use crate::rbac::Role;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use super::UsageResolver;

/// Assignment counts keyed by role id.
///
/// Reference resolver for single-process deployments and tests; real
/// deployments point the registry at the assignment service instead.
#[derive(Debug, Default)]
pub struct AssignmentTable {
    counts: DashMap<String, u64>,
}

impl AssignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more principal holding the role
    pub fn assign(&self, role_id: &str) -> u64 {
        let mut count = self.counts.entry(role_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Remove one principal from the role; never goes below zero
    pub fn unassign(&self, role_id: &str) -> u64 {
        match self.counts.get_mut(role_id) {
            Some(mut count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        }
    }

    pub fn set(&self, role_id: &str, count: u64) {
        self.counts.insert(role_id.to_string(), count);
    }

    pub fn count(&self, role_id: &str) -> u64 {
        self.counts.get(role_id).map(|count| *count).unwrap_or(0)
    }

    pub fn clear(&self, role_id: &str) {
        self.counts.remove(role_id);
    }
}

#[async_trait]
impl UsageResolver for AssignmentTable {
    async fn count_assignments(&self, role: &Role) -> Result<u64> {
        Ok(self.count(&role.id))
    }
}
