//! Registry integration tests
//!
//! Walks an administrator's workflow through the public API: seeding,
//! authoring custom roles, group toggles, cloning and guarded deletion.

#[cfg(test)]
mod tests {
    use crate::common::{CatalogFactory, TestRegistry};
    use crate::{assert_err, assert_ok};
    use role_admin::{
        ErrorCategory, GroupAction, GroupState, RoleAdminError, RolePatch, RoleRegistry,
        RoleType,
    };

    // ==================== Seeding ====================

    #[tokio::test]
    async fn test_registry_seeds_system_roles() {
        let t = TestRegistry::new().await;
        let roles = assert_ok!(t.registry.list_roles().await);

        assert_eq!(roles.len(), 2);
        assert!(roles.iter().all(|r| r.role_type == RoleType::System));

        let admin_id = t.id_of("administrator").await;
        let admin = assert_ok!(t.registry.get_role(&admin_id).await);
        assert_eq!(admin.permissions, t.registry.catalog().all_ids());
    }

    #[tokio::test]
    async fn test_registry_without_seeding() {
        let mut config = CatalogFactory::config();
        config.registry.seed_system_roles = false;

        let t = TestRegistry::with_config(config).await;
        assert!(assert_ok!(t.registry.list_roles().await).is_empty());
    }

    // ==================== Custom role workflow ====================

    #[tokio::test]
    async fn test_custom_role_workflow() {
        let t = TestRegistry::new().await;
        let billing = t.registry.catalog().group("Billing").unwrap().permissions.clone();

        let role = assert_ok!(
            t.registry
                .create_role("Associate", "Junior lawyer", ["reports:view"])
                .await
        );

        // Empty group goes straight to fully selected
        let toggle = assert_ok!(t.registry.toggle_group(&role.id, &billing).await);
        assert_eq!(toggle.state, GroupState::All);
        assert_eq!(toggle.action, GroupAction::Selected);
        assert_eq!(toggle.role.permissions.len(), 3);

        // Dropping one permission leaves the group partial
        let role = assert_ok!(t.registry.toggle_permission(&role.id, "billing:create").await);
        let summary = assert_ok!(t.registry.group_summary(&role.id).await);
        assert_eq!(summary[0].name, "Billing");
        assert_eq!(summary[0].state, GroupState::Some);
        assert_eq!((summary[0].selected, summary[0].total), (1, 2));

        // Partial groups fill in on toggle
        let toggle = assert_ok!(t.registry.toggle_group(&role.id, &billing).await);
        assert_eq!(toggle.state, GroupState::All);

        let updated = assert_ok!(
            t.registry
                .update_role(
                    &role.id,
                    RolePatch::new()
                        .description("Associate attorney")
                        .expected_version(toggle.role.version),
                )
                .await
        );
        assert_eq!(updated.description, "Associate attorney");
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(updated.created_at, role.created_at);
    }

    #[tokio::test]
    async fn test_rename_to_own_name_with_different_case() {
        let t = TestRegistry::new().await;
        let role = assert_ok!(
            t.registry
                .create_role("associate", "", Vec::<&str>::new())
                .await
        );

        let renamed = assert_ok!(
            t.registry
                .update_role(&role.id, RolePatch::new().name("Associate"))
                .await
        );
        assert_eq!(renamed.name, "Associate");
    }

    #[tokio::test]
    async fn test_duplicate_names_are_rejected() {
        let t = TestRegistry::new().await;
        let err = assert_err!(
            t.registry
                .create_role(" staff ", "", Vec::<&str>::new())
                .await
        );
        assert!(matches!(err, RoleAdminError::InvalidName(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    // ==================== Clone ====================

    #[tokio::test]
    async fn test_clone_then_edit_independently() {
        let t = TestRegistry::new().await;
        let staff_id = t.id_of("Staff").await;

        let copy = assert_ok!(t.registry.clone_role(&staff_id).await);
        assert_eq!(copy.name, "Staff (Copy)");
        assert_eq!(copy.role_type, RoleType::Custom);

        let renamed = assert_ok!(
            t.registry
                .update_role(&copy.id, RolePatch::new().name("Front Desk"))
                .await
        );
        assert_eq!(renamed.name, "Front Desk");

        // The freed name is reused by the next clone
        let again = assert_ok!(t.registry.clone_role(&staff_id).await);
        assert_eq!(again.name, "Staff (Copy)");
    }

    #[tokio::test]
    async fn test_clone_missing_role() {
        let t = TestRegistry::new().await;
        let err = assert_err!(t.registry.clone_role("missing").await);
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_after_users_move_away() {
        let t = TestRegistry::new().await;
        let role = assert_ok!(
            t.registry
                .create_role("Contractor", "", ["reports:view"])
                .await
        );

        t.assignments.assign(&role.id);
        let err = assert_err!(t.registry.delete_role(&role.id).await);
        assert!(matches!(err, RoleAdminError::RoleInUse { count: 1, .. }));
        assert_eq!(err.category(), ErrorCategory::Validation);

        t.assignments.unassign(&role.id);
        assert_ok!(t.registry.delete_role(&role.id).await);
        assert!(assert_ok!(t.registry.find_role_by_name("Contractor").await).is_none());
    }

    #[tokio::test]
    async fn test_moving_default_unlocks_previous_default() {
        let t = TestRegistry::new().await;
        let intern = assert_ok!(
            t.registry
                .create_role("Intern", "", Vec::<&str>::new())
                .await
        );
        let visitor = assert_ok!(
            t.registry
                .create_role("Visitor", "", Vec::<&str>::new())
                .await
        );

        assert_ok!(t.registry.set_default_role(&visitor.id).await);
        let err = assert_err!(t.registry.delete_role(&visitor.id).await);
        assert!(matches!(err, RoleAdminError::DefaultRoleProtected(_)));

        assert_ok!(t.registry.set_default_role(&intern.id).await);
        assert_ok!(t.registry.delete_role(&visitor.id).await);

        let defaults: Vec<_> = assert_ok!(t.registry.list_roles().await)
            .into_iter()
            .filter(|r| r.is_default)
            .map(|r| r.name)
            .collect();
        assert_eq!(defaults, vec!["Intern".to_string()]);
    }

    #[tokio::test]
    async fn test_default_registry_blocks_delete_of_held_role() {
        let registry = assert_ok!(RoleRegistry::from_config(&CatalogFactory::config()).await);
        let role = assert_ok!(
            registry
                .create_role("Contractor", "", Vec::<&str>::new())
                .await
        );

        let table = registry
            .assignment_table()
            .expect("in-process table without a usage endpoint");
        table.set(&role.id, 2);

        let err = assert_err!(registry.delete_role(&role.id).await);
        assert!(matches!(err, RoleAdminError::RoleInUse { count: 2, .. }));
        assert_eq!(assert_ok!(registry.usage_count(&role.id).await), 2);
    }

    // ==================== Views ====================

    #[tokio::test]
    async fn test_describe_role_serializes() {
        let t = TestRegistry::new().await;
        let staff_id = t.id_of("Staff").await;
        t.assignments.set(&staff_id, 4);

        let view = assert_ok!(t.registry.describe_role(&staff_id).await);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["role"]["type"], "system");
        assert_eq!(json["role"]["is_default"], true);
        assert_eq!(json["assignments"], 4);
        assert_eq!(json["groups"][0]["state"], "none");
    }
}
