//! Test fixtures and factories
//!
//! All factories build real objects; nothing here is mocked.

use role_admin::config::{
    CatalogConfig, CatalogDefinition, GroupDefinition, PermissionDefinition,
    SystemRoleDefinition,
};
use role_admin::{AssignmentTable, Config, MemoryRoleStore, RoleRegistry, Scope};
use std::sync::Arc;

/// Factory for catalog definitions
pub struct CatalogFactory;

impl CatalogFactory {
    /// Small practice catalog: two billing permissions, one report and one
    /// client permission, with a Billing and a Reports group.
    pub fn practice() -> CatalogDefinition {
        CatalogDefinition {
            permissions: vec![
                PermissionDefinition::new("billing:view", Scope::Team, "View invoices"),
                PermissionDefinition::new("billing:create", Scope::Team, "Create invoices"),
                PermissionDefinition::new("reports:view", Scope::Org, "View reports"),
                PermissionDefinition::new("clients:view", Scope::Own, "View own clients"),
            ],
            groups: vec![
                Self::group("Billing", &["billing:view", "billing:create"]),
                Self::group("Reports", &["reports:view"]),
            ],
            system_roles: vec![
                SystemRoleDefinition {
                    name: "Administrator".to_string(),
                    description: "Full access".to_string(),
                    permissions: vec!["*".to_string()],
                    is_default: false,
                },
                SystemRoleDefinition {
                    name: "Staff".to_string(),
                    description: "Default access for new users".to_string(),
                    permissions: vec!["clients:view".to_string()],
                    is_default: true,
                },
            ],
        }
    }

    pub fn group(name: &str, permissions: &[&str]) -> GroupDefinition {
        GroupDefinition {
            name: name.to_string(),
            description: String::new(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// The practice catalog as a catalog file
    pub fn practice_yaml() -> String {
        r#"
permissions:
  - id: "billing:view"
    scope: team
    description: View invoices
  - id: "billing:create"
    scope: team
  - id: "reports:view"
  - id: "clients:view"
    scope: self
groups:
  - name: Billing
    permissions: ["billing:view", "billing:create"]
  - name: Reports
    permissions: ["reports:view"]
system_roles:
  - name: Administrator
    permissions: ["*"]
  - name: Staff
    permissions: ["clients:view"]
    is_default: true
"#
        .to_string()
    }

    /// Configuration using the practice catalog inline
    pub fn config() -> Config {
        let mut config = Config::default();
        config.catalog = CatalogConfig::inline(Self::practice());
        config
    }
}

/// Registry plus the assignment table backing its usage checks
pub struct TestRegistry {
    pub registry: RoleRegistry,
    pub assignments: Arc<AssignmentTable>,
}

impl TestRegistry {
    pub async fn new() -> Self {
        Self::with_config(CatalogFactory::config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let assignments = Arc::new(AssignmentTable::new());
        let registry = RoleRegistry::from_parts(
            &config,
            Arc::new(MemoryRoleStore::new()),
            assignments.clone(),
        )
        .await
        .expect("registry should build from a valid config");

        Self {
            registry,
            assignments,
        }
    }

    /// Id of a stored role, looked up by name
    pub async fn id_of(&self, name: &str) -> String {
        self.registry
            .find_role_by_name(name)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("role '{}' should exist", name))
            .id
    }
}
