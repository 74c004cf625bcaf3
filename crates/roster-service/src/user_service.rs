//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RoleId, RosterResult, UserId, UserQuery};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists users: filter, then sort, then paginate.
    async fn list_users(&self, query: UserQuery) -> RosterResult<UserListResponse>;

    /// Gets a user by ID, with roles.
    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Creates a new user linked to the requested roles.
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Replaces a user's profile and reconciles its roles with the requested set.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Links one more role to a user.
    async fn add_user_role(&self, id: UserId, role_id: RoleId) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;
}
