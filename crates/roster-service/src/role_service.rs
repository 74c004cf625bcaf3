//! Role service trait definition.

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use async_trait::async_trait;
use roster_core::{Interface, RoleId, RosterResult};

/// Role service trait.
#[async_trait]
pub trait RoleService: Interface + Send + Sync {
    /// Lists every role.
    async fn list_roles(&self) -> RosterResult<Vec<RoleResponse>>;

    /// Gets a role by ID.
    async fn get_role(&self, id: RoleId) -> RosterResult<RoleResponse>;

    /// Creates a new role.
    async fn create_role(&self, request: CreateRoleRequest) -> RosterResult<RoleResponse>;

    /// Renames a role. The body id must match `id`.
    async fn update_role(&self, id: RoleId, request: UpdateRoleRequest) -> RosterResult<RoleResponse>;

    /// Deletes a role and unlinks it from every user.
    async fn delete_role(&self, id: RoleId) -> RosterResult<()>;
}
