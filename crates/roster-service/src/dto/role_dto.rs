//! Role-related DTOs.

use roster_core::validation::rules::not_blank;
use roster_core::{Role, RoleId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
}

/// Request to rename a role. `id` must repeat the path id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    pub id: RoleId,

    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
}

/// Role response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub id: RoleId,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}
