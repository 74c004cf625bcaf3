//! User entity.

use super::Role;
use crate::{RoleId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user together with its eager-loaded roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, immutable after creation.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Age in years.
    pub age: i32,

    /// Email address, unique across users at creation time.
    pub email: String,

    /// Roles linked through the `user_roles` join table.
    pub roles: Vec<Role>,

    /// Optimistic concurrency token. Starts at 1, bumped by every write.
    pub version: i64,
}

impl User {
    /// Creates a user that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            id: UserId(0),
            name: name.into(),
            age,
            email: email.into(),
            roles: Vec::new(),
            version: 1,
        }
    }

    /// Sets the user's roles.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns the ids of the roles the user currently holds.
    #[must_use]
    pub fn role_ids(&self) -> BTreeSet<RoleId> {
        self.roles.iter().map(|r| r.id).collect()
    }

    /// Checks if the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }
}

/// A link between a user and a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserRole {
    /// The linked user.
    pub user_id: UserId,
    /// The linked role.
    pub role_id: RoleId,
}

impl UserRole {
    /// Creates a link.
    #[must_use]
    pub const fn new(user_id: UserId, role_id: RoleId) -> Self {
        Self { user_id, role_id }
    }
}
