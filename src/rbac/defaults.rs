//! Built-in permission catalog and seeded system roles

use crate::config::{
    ALL_PERMISSIONS, CatalogDefinition, GroupDefinition, PermissionDefinition,
    SystemRoleDefinition,
};

use super::types::Scope;

fn permission(id: &str, scope: Scope, description: &str) -> PermissionDefinition {
    PermissionDefinition::new(id, scope, description)
}

fn group(name: &str, description: &str, permissions: &[&str]) -> GroupDefinition {
    GroupDefinition {
        name: name.to_string(),
        description: description.to_string(),
        permissions: permissions.iter().map(|s| s.to_string()).collect(),
    }
}

fn system_role(
    name: &str,
    description: &str,
    permissions: &[&str],
    is_default: bool,
) -> SystemRoleDefinition {
    SystemRoleDefinition {
        name: name.to_string(),
        description: description.to_string(),
        permissions: permissions.iter().map(|s| s.to_string()).collect(),
        is_default,
    }
}

/// Catalog used when no other source is configured
pub fn builtin_catalog() -> CatalogDefinition {
    let permissions = vec![
        // Clients
        permission("clients:view", Scope::Team, "View client records"),
        permission("clients:create", Scope::Team, "Create client records"),
        permission("clients:edit", Scope::Team, "Edit client records"),
        permission("clients:delete", Scope::Org, "Delete client records"),
        // Matters
        permission("matters:view", Scope::Team, "View matters"),
        permission("matters:create", Scope::Team, "Open new matters"),
        permission("matters:edit", Scope::Team, "Edit matter details"),
        permission("matters:close", Scope::Team, "Close matters"),
        permission("matters:delete", Scope::Org, "Delete matters"),
        // Documents
        permission("documents:view", Scope::Team, "View documents"),
        permission("documents:upload", Scope::Team, "Upload documents"),
        permission("documents:edit", Scope::Team, "Edit documents"),
        permission("documents:delete", Scope::Org, "Delete documents"),
        permission("documents:share", Scope::Team, "Share documents externally"),
        // Time and billing
        permission("time:view", Scope::Own, "View time entries"),
        permission("time:create", Scope::Own, "Record time entries"),
        permission("time:edit", Scope::Own, "Edit time entries"),
        permission("billing:view", Scope::Org, "View invoices and payments"),
        permission("billing:create", Scope::Org, "Create invoices"),
        permission("billing:edit", Scope::Org, "Edit invoices"),
        permission("billing:approve", Scope::Org, "Approve invoices for sending"),
        // Reports
        permission("reports:view", Scope::Org, "View reports"),
        permission("reports:export", Scope::Org, "Export reports"),
        // Administration
        permission("users:view", Scope::Org, "View users"),
        permission("users:manage", Scope::Org, "Invite, edit and deactivate users"),
        permission("roles:view", Scope::Org, "View roles"),
        permission("roles:manage", Scope::Org, "Create, edit and delete roles"),
        permission("settings:manage", Scope::Org, "Manage firm settings"),
    ];

    let groups = vec![
        group(
            "Client Management",
            "Access to client records",
            &["clients:view", "clients:create", "clients:edit", "clients:delete"],
        ),
        group(
            "Matter Management",
            "Open, work and close matters",
            &[
                "matters:view",
                "matters:create",
                "matters:edit",
                "matters:close",
                "matters:delete",
            ],
        ),
        group(
            "Documents",
            "Document storage and sharing",
            &[
                "documents:view",
                "documents:upload",
                "documents:edit",
                "documents:delete",
                "documents:share",
            ],
        ),
        group(
            "Time Tracking",
            "Record and review time",
            &["time:view", "time:create", "time:edit"],
        ),
        group(
            "Billing",
            "Invoices and payments",
            &["billing:view", "billing:create", "billing:edit", "billing:approve"],
        ),
        group(
            "Reports",
            "Firm reporting",
            &["reports:view", "reports:export"],
        ),
        group(
            "Administration",
            "Users, roles and firm settings",
            &[
                "users:view",
                "users:manage",
                "roles:view",
                "roles:manage",
                "settings:manage",
            ],
        ),
    ];

    let system_roles = vec![
        system_role(
            "Administrator",
            "Full access to every area of the firm",
            &[ALL_PERMISSIONS],
            false,
        ),
        system_role(
            "Attorney",
            "Manages clients and matters and records billable time",
            &[
                "clients:view",
                "clients:create",
                "clients:edit",
                "matters:view",
                "matters:create",
                "matters:edit",
                "matters:close",
                "documents:view",
                "documents:upload",
                "documents:edit",
                "documents:share",
                "time:view",
                "time:create",
                "time:edit",
                "billing:view",
                "reports:view",
            ],
            false,
        ),
        system_role(
            "Paralegal",
            "Supports attorneys on matters and documents",
            &[
                "clients:view",
                "matters:view",
                "matters:edit",
                "documents:view",
                "documents:upload",
                "documents:edit",
                "time:view",
                "time:create",
            ],
            false,
        ),
        system_role(
            "Billing Specialist",
            "Prepares and approves invoices",
            &[
                "clients:view",
                "matters:view",
                "time:view",
                "billing:view",
                "billing:create",
                "billing:edit",
                "billing:approve",
                "reports:view",
                "reports:export",
            ],
            false,
        ),
        system_role(
            "Staff",
            "Read-only access for new team members",
            &["clients:view", "matters:view", "documents:view", "time:view"],
            true,
        ),
    ];

    CatalogDefinition {
        permissions,
        groups,
        system_roles,
    }
}
