//! Usage resolution
//!
//! Answers "how many active principals hold this role". The registry treats
//! every resolver as a read-only oracle and consults it before deletes.

mod assignments;
mod callback;
mod http;

pub use assignments::AssignmentTable;
pub use callback::CallbackUsageResolver;
pub use http::HttpUsageResolver;

use crate::rbac::Role;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Counts active assignments of a role
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageResolver: Send + Sync {
    /// Number of principals currently holding `role`.
    ///
    /// Returns `Ok(0)` for an unassigned role. Fails with
    /// `UpstreamUnavailable` when the assignment store cannot be reached.
    async fn count_assignments(&self, role: &Role) -> Result<u64>;
}
