//! Group selection over a role's permission set
//!
//! Pure functions: they never touch the store and never validate ids against
//! the catalog. The registry does both before and after calling in here.

use std::collections::BTreeSet;

use super::types::{GroupAction, GroupState, GroupStatus, PermissionGroup};

/// Outcome of a group operation on a bare permission set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub permissions: BTreeSet<String>,
    pub state: GroupState,
    pub action: GroupAction,
}

fn distinct<S: AsRef<str>>(group: &[S]) -> BTreeSet<&str> {
    group.iter().map(AsRef::as_ref).collect()
}

/// Tri-state of `group` against `permissions`. An empty group is `None`.
pub fn group_state<S: AsRef<str>>(permissions: &BTreeSet<String>, group: &[S]) -> GroupState {
    let members = distinct(group);
    let selected = members.iter().filter(|id| permissions.contains(**id)).count();
    state_for(selected, members.len())
}

fn state_for(selected: usize, total: usize) -> GroupState {
    if total == 0 || selected == 0 {
        GroupState::None
    } else if selected == total {
        GroupState::All
    } else {
        GroupState::Some
    }
}

/// Whether every member of `group` is granted (vacuously true for an empty group)
pub fn has_all<S: AsRef<str>>(permissions: &BTreeSet<String>, group: &[S]) -> bool {
    group.iter().all(|id| permissions.contains(id.as_ref()))
}

/// Whether at least one member of `group` is granted
pub fn has_some<S: AsRef<str>>(permissions: &BTreeSet<String>, group: &[S]) -> bool {
    group.iter().any(|id| permissions.contains(id.as_ref()))
}

/// Toggle a whole group.
///
/// A fully selected group is removed; anything else (partial or empty
/// selection) is filled in completely. The new set is built in one pass and
/// returned whole, so callers never observe a half-applied group.
pub fn toggle_group<S: AsRef<str>>(permissions: &BTreeSet<String>, group: &[S]) -> Selection {
    if group.is_empty() {
        return Selection {
            permissions: permissions.clone(),
            state: GroupState::None,
            action: GroupAction::Unchanged,
        };
    }

    let select = !has_all(permissions, group);
    set_group(permissions, group, select)
}

/// Force a group fully on (`select = true`) or fully off.
pub fn set_group<S: AsRef<str>>(
    permissions: &BTreeSet<String>,
    group: &[S],
    select: bool,
) -> Selection {
    let members = distinct(group);

    let next: BTreeSet<String> = if select {
        permissions
            .iter()
            .cloned()
            .chain(members.iter().map(|id| (*id).to_string()))
            .collect()
    } else {
        permissions
            .iter()
            .filter(|id| !members.contains(id.as_str()))
            .cloned()
            .collect()
    };

    let action = if next == *permissions {
        GroupAction::Unchanged
    } else if select {
        GroupAction::Selected
    } else {
        GroupAction::Deselected
    };

    let state = group_state(&next, group);
    Selection {
        permissions: next,
        state,
        action,
    }
}

/// Flip a single permission in or out of the set
pub fn toggle_permission(permissions: &BTreeSet<String>, permission_id: &str) -> BTreeSet<String> {
    let mut next = permissions.clone();
    if !next.remove(permission_id) {
        next.insert(permission_id.to_string());
    }
    next
}

/// Tri-state summary for every group, in group order
pub fn group_summary(permissions: &BTreeSet<String>, groups: &[PermissionGroup]) -> Vec<GroupStatus> {
    groups
        .iter()
        .map(|group| {
            let members = distinct(&group.permissions);
            let selected = members.iter().filter(|id| permissions.contains(**id)).count();
            GroupStatus {
                name: group.name.clone(),
                state: state_for(selected, members.len()),
                selected,
                total: members.len(),
            }
        })
        .collect()
}
