//! User-related DTOs.

use crate::dto::RoleResponse;
use roster_core::validation::rules::not_blank;
use roster_core::{RoleId, User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(range(min = 1, message = "Age must be greater than zero"))]
    pub age: i32,

    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,

    /// Roles to link; every id must exist.
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// Request to replace a user's profile and role set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    pub age: i32,

    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,

    /// The complete desired role set.
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub roles: Vec<RoleResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            email: user.email,
            roles: user.roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

/// User list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    /// Users matching the filter, across all pages.
    pub total_items: u64,
    pub total_pages: u64,
    /// The served page after clamping.
    pub page: u64,
    pub page_size: u64,
    pub users: Vec<UserResponse>,
}
