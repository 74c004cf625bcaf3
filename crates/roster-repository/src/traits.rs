//! Repository trait definitions.
//!
//! Users are always returned with their roles eager-loaded. Writes that touch
//! a user row compare the caller's `version` against the stored one and fail
//! with `RosterError::Conflict` when it is stale or the row is gone.

use async_trait::async_trait;
use roster_core::{Interface, Role, RoleDiff, RoleId, RosterResult, User, UserId};

/// User repository trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Returns every user, ordered by id.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Checks if a user exists.
    async fn exists(&self, id: UserId) -> RosterResult<bool>;

    /// Checks if an email is already taken.
    async fn exists_by_email(&self, email: &str) -> RosterResult<bool>;

    /// Inserts a new user together with links to `user.roles`.
    ///
    /// Returns the stored user with its assigned id and version 1.
    async fn save(&self, user: &User) -> RosterResult<User>;

    /// Writes the profile fields of `user` and applies `diff` to its role
    /// links in one transaction, bumping the version.
    async fn update(&self, user: &User, diff: &RoleDiff) -> RosterResult<User>;

    /// Deletes a user; its role links go with it.
    async fn delete(&self, id: UserId) -> RosterResult<bool>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;
}

/// Role repository trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RoleRepository: Interface + Send + Sync {
    /// Finds a role by ID.
    async fn find_by_id(&self, id: RoleId) -> RosterResult<Option<Role>>;

    /// Returns every role, ordered by id.
    async fn find_all(&self) -> RosterResult<Vec<Role>>;

    /// Checks if a role exists.
    async fn exists(&self, id: RoleId) -> RosterResult<bool>;

    /// Inserts a new role and returns it with its assigned id.
    async fn save(&self, role: &Role) -> RosterResult<Role>;

    /// Renames an existing role. Fails with `NotFound` if it is missing.
    async fn update(&self, role: &Role) -> RosterResult<Role>;

    /// Deletes a role and every user link to it.
    async fn delete(&self, id: RoleId) -> RosterResult<bool>;
}
