//! Role reconciliation: the minimal link changes taking a user from its
//! current role set to a desired one.

use crate::RoleId;
use std::collections::BTreeSet;

/// The add/remove sets produced by [`reconcile`]. The two sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    /// Roles in the desired set the user does not hold yet.
    pub to_add: BTreeSet<RoleId>,
    /// Roles the user holds that are not in the desired set.
    pub to_remove: BTreeSet<RoleId>,
}

impl RoleDiff {
    /// Returns true when no link has to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes `desired - current` and `current - desired`.
#[must_use]
pub fn reconcile<C, D>(current: C, desired: D) -> RoleDiff
where
    C: IntoIterator<Item = RoleId>,
    D: IntoIterator<Item = RoleId>,
{
    let current: BTreeSet<RoleId> = current.into_iter().collect();
    let desired: BTreeSet<RoleId> = desired.into_iter().collect();

    RoleDiff {
        to_add: desired.difference(&current).copied().collect(),
        to_remove: current.difference(&desired).copied().collect(),
    }
}
