//! Closure-backed usage resolver

use crate::rbac::Role;
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

use super::UsageResolver;

type UsageCallback = Arc<dyn Fn(Role) -> BoxFuture<'static, Result<u64>> + Send + Sync>;

/// Delegates counting to a caller-supplied async function, for hosts that
/// already hold assignment data in their own service layer.
#[derive(Clone)]
pub struct CallbackUsageResolver {
    callback: UsageCallback,
}

impl CallbackUsageResolver {
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(Role) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<u64>> + Send + 'static,
    {
        Self {
            callback: Arc::new(move |role| Box::pin(callback(role))),
        }
    }
}

impl std::fmt::Debug for CallbackUsageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackUsageResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl UsageResolver for CallbackUsageResolver {
    async fn count_assignments(&self, role: &Role) -> Result<u64> {
        (self.callback)(role.clone()).await
    }
}
