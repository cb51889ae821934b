//! Concurrent writer integration tests
//!
//! Several administrators editing at once must never lose an update or
//! produce two roles with the same name.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::TestRegistry;
    use futures::future::join_all;
    use role_admin::{RoleAdminError, RolePatch};
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_name() {
        let t = Arc::new(TestRegistry::new().await);

        let tasks = (0..16).map(|i| {
            let t = t.clone();
            tokio::spawn(async move {
                let name = if i % 2 == 0 { "Auditor" } else { "AUDITOR" };
                t.registry.create_role(name, "", Vec::<&str>::new()).await
            })
        });

        let results: Vec<_> = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let created = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, RoleAdminError::InvalidName(_)))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stale_writers_get_version_conflicts() {
        let t = Arc::new(TestRegistry::new().await);
        let role = assert_ok!(
            t.registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );

        let tasks = ["billing:view", "billing:create", "reports:view", "clients:view"]
            .into_iter()
            .map(|permission| {
                let t = t.clone();
                let id = role.id.clone();
                let version = role.version;
                tokio::spawn(async move {
                    t.registry
                        .toggle_group_at(&id, version, [permission])
                        .await
                })
            });

        let results: Vec<_> = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let applied = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(RoleAdminError::VersionConflict { .. })))
            .count();
        assert_eq!(applied, 1);
        assert_eq!(conflicts, 3);

        let stored = assert_ok!(t.registry.get_role(&role.id).await);
        assert_eq!(stored.permissions.len(), 1);
        assert_eq!(stored.version, role.version + 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_retry_after_conflict_succeeds() {
        let t = TestRegistry::new().await;
        let role = assert_ok!(
            t.registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );
        assert_ok!(t.registry.toggle_permission(&role.id, "reports:view").await);

        let stale = t
            .registry
            .update_role(
                &role.id,
                RolePatch::new()
                    .description("first draft")
                    .expected_version(role.version),
            )
            .await;
        assert!(matches!(stale, Err(ref e) if e.is_retryable()));

        let fresh = assert_ok!(t.registry.get_role(&role.id).await);
        let updated = assert_ok!(
            t.registry
                .update_role(
                    &role.id,
                    RolePatch::new()
                        .description("first draft")
                        .expected_version(fresh.version),
                )
                .await
        );
        assert!(updated.has_permission("reports:view"));
        assert_eq!(updated.description, "first draft");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unversioned_toggles_do_not_lose_updates() {
        let t = Arc::new(TestRegistry::new().await);
        let role = assert_ok!(
            t.registry
                .create_role("Associate", "", Vec::<&str>::new())
                .await
        );

        let tasks = ["billing:view", "billing:create", "reports:view", "clients:view"]
            .into_iter()
            .map(|permission| {
                let t = t.clone();
                let id = role.id.clone();
                tokio::spawn(async move {
                    loop {
                        match t.registry.toggle_permission(&id, permission).await {
                            Err(RoleAdminError::VersionConflict { .. }) => continue,
                            other => return other,
                        }
                    }
                })
            });

        for joined in join_all(tasks).await {
            assert_ok!(joined.unwrap());
        }

        let stored = assert_ok!(t.registry.get_role(&role.id).await);
        assert_eq!(stored.permissions.len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clones_all_get_distinct_names() {
        let t = Arc::new(TestRegistry::new().await);
        let source = assert_ok!(
            t.registry
                .create_role("Paralegal", "Supports attorneys", ["billing:view"])
                .await
        );

        let tasks = (0..32).map(|_| {
            let t = t.clone();
            let id = source.id.clone();
            tokio::spawn(async move { t.registry.clone_role(&id).await })
        });

        let mut names = HashSet::new();
        for joined in join_all(tasks).await {
            let copy = assert_ok!(joined.unwrap());
            assert!(copy.name.starts_with("Paralegal (Copy"));
            assert_eq!(copy.permissions, source.permissions);
            assert!(names.insert(copy.name));
        }

        assert_eq!(names.len(), 32);
        assert!(names.contains("Paralegal (Copy)"));
        assert!(names.contains("Paralegal (Copy 32)"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_default_moves_leave_one_default() {
        let t = Arc::new(TestRegistry::new().await);
        let mut ids = Vec::new();
        for i in 0..8 {
            let role = assert_ok!(
                t.registry
                    .create_role(&format!("Team {}", i), "", Vec::<&str>::new())
                    .await
            );
            ids.push(role.id);
        }

        let tasks = ids.into_iter().map(|id| {
            let t = t.clone();
            tokio::spawn(async move { t.registry.set_default_role(&id).await })
        });
        for joined in join_all(tasks).await {
            assert_ok!(joined.unwrap());
        }

        let defaults = assert_ok!(t.registry.list_roles().await)
            .into_iter()
            .filter(|r| r.is_default)
            .count();
        assert_eq!(defaults, 1);
    }
}
