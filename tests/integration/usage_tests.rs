//! Usage resolver integration tests
//!
//! Runs the registry against a mock assignment service over HTTP and
//! against a host-supplied callback.

#[cfg(test)]
mod tests {
    use crate::common::CatalogFactory;
    use crate::{assert_err, assert_ok};
    use role_admin::{
        CallbackUsageResolver, MemoryRoleStore, Role, RoleAdminError, RoleRegistry,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn http_registry(server: &MockServer) -> RoleRegistry {
        let mut config = CatalogFactory::config();
        config.usage.endpoint = Some(format!("{}/api", server.uri()));
        config.usage.timeout_ms = 200;
        assert_ok!(RoleRegistry::from_config(&config).await)
    }

    #[tokio::test]
    async fn test_delete_blocked_by_assignment_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/roles/[^/]+/assignments$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 7})))
            .mount(&server)
            .await;

        let registry = http_registry(&server).await;
        let role = assert_ok!(
            registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );

        let err = assert_err!(registry.delete_role(&role.id).await);
        assert!(matches!(err, RoleAdminError::RoleInUse { count: 7, .. }));
        assert_eq!(assert_ok!(registry.usage_count(&role.id).await), 7);
    }

    #[tokio::test]
    async fn test_delete_allowed_when_service_has_no_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let registry = http_registry(&server).await;
        let role = assert_ok!(
            registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );

        assert_ok!(registry.delete_role(&role.id).await);
    }

    #[tokio::test]
    async fn test_delete_fails_closed_on_slow_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"count": 0}))
                    .set_delay(std::time::Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let registry = http_registry(&server).await;
        let role = assert_ok!(
            registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );

        let err = assert_err!(registry.delete_role(&role.id).await);
        assert!(matches!(err, RoleAdminError::UpstreamUnavailable(_)));
        assert!(err.is_retryable());
        assert_ok!(registry.get_role(&role.id).await);
    }

    #[tokio::test]
    async fn test_describe_survives_service_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let registry = http_registry(&server).await;
        let staff = assert_ok!(registry.find_role_by_name("Staff").await).unwrap();

        let view = assert_ok!(registry.describe_role(&staff.id).await);
        assert_eq!(view.assignments, None);
        assert!(registry.list_roles_with_usage().await.is_err());
    }

    #[tokio::test]
    async fn test_callback_resolver_from_host() {
        let directory: Arc<HashMap<String, u64>> =
            Arc::new([("Staff".to_string(), 3)].into_iter().collect());
        let usage = CallbackUsageResolver::new(move |role: Role| {
            let directory = directory.clone();
            async move { Ok(directory.get(&role.name).copied().unwrap_or(0)) }
        });

        let registry = assert_ok!(
            RoleRegistry::from_parts(
                &CatalogFactory::config(),
                Arc::new(MemoryRoleStore::new()),
                Arc::new(usage),
            )
            .await
        );

        let usage = assert_ok!(registry.list_roles_with_usage().await);
        let staff = usage.iter().find(|u| u.role.name == "Staff").unwrap();
        let admin = usage.iter().find(|u| u.role.name == "Administrator").unwrap();
        assert_eq!(staff.assignments, 3);
        assert_eq!(admin.assignments, 0);
    }
}
