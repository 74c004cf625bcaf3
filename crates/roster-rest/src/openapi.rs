//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use roster_core::{ErrorResponse, FieldError, RoleId, UserId};
use roster_service::{
    CreateRoleRequest, CreateUserRequest, RoleResponse, UpdateRoleRequest, UpdateUserRequest,
    UserListResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "Users and roles with filtering, sorting, and pagination",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::add_user_role,
        crate::controllers::user_controller::delete_user,
        // Role endpoints
        crate::controllers::role_controller::list_roles,
        crate::controllers::role_controller::create_role,
        crate::controllers::role_controller::get_role,
        crate::controllers::role_controller::update_role,
        crate::controllers::role_controller::delete_role,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            RoleId,
            ErrorResponse,
            FieldError,
            HealthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserListResponse,
            CreateRoleRequest,
            UpdateRoleRequest,
            RoleResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "roles", description = "Role management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/users",
            "/api/users/{id}",
            "/api/users/{id}/roles/{role_id}",
            "/api/roles",
            "/api/roles/{id}",
            "/health",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
