//! HTTP usage resolver
//!
//! `GET {endpoint}/roles/{role_id}/assignments` answering `{"count": n}`.
//! A 404 means the assignment service has never seen the role, which is
//! reported as zero assignments.

use crate::rbac::Role;
use crate::utils::error::{Result, RoleAdminError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::UsageResolver;

#[derive(Debug, Deserialize)]
struct AssignmentCountResponse {
    count: u64,
}

/// Usage resolver backed by the assignment service
#[derive(Debug, Clone)]
pub struct HttpUsageResolver {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpUsageResolver {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            RoleAdminError::Config(format!("Invalid usage endpoint '{}': {}", endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoleAdminError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    fn assignments_url(&self, role_id: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RoleAdminError::Config(format!(
                    "Usage endpoint cannot be a base URL: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(["roles", role_id, "assignments"]);
        Ok(url)
    }
}

#[async_trait]
impl UsageResolver for HttpUsageResolver {
    async fn count_assignments(&self, role: &Role) -> Result<u64> {
        let url = self.assignments_url(&role.id)?;
        debug!("Querying assignment count: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Usage resolver request failed: {}", e);
            RoleAdminError::UpstreamUnavailable(format!("Assignment service unreachable: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(0);
        }
        if !status.is_success() {
            warn!("Usage resolver returned {} for role {}", status, role.id);
            return Err(RoleAdminError::UpstreamUnavailable(format!(
                "Assignment service returned {}",
                status
            )));
        }

        let body: AssignmentCountResponse = response.json().await.map_err(|e| {
            RoleAdminError::UpstreamUnavailable(format!(
                "Invalid assignment service response: {}",
                e
            ))
        })?;

        Ok(body.count)
    }
}
