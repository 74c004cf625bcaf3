//! Role management controller.

use crate::{
    controllers::parse_id,
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{ErrorResponse, RoleId};
use roster_service::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use tracing::debug;

/// Creates the role router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/:id", get(get_role).put(update_role).delete(delete_role))
}

/// List all roles.
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "roles",
    responses((status = 200, description = "All roles", body = [RoleResponse]))
)]
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Vec<RoleResponse>> {
    debug!("List roles request");

    let response = state.role_service.list_roles().await?;
    ok(response)
}

/// Get a role by ID.
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "The role", body = RoleResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn get_role(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<RoleResponse> {
    debug!("Get role request: {}", id);

    let role_id: RoleId = parse_id("role", &id)?;
    let response = state.role_service.get_role(role_id).await?;
    ok(response)
}

/// Create a new role.
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "roles",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoleResponse>>), AppError> {
    debug!("Create role request: {}", request.name);

    let response = state.role_service.create_role(request).await?;
    Ok(created(response))
}

/// Rename a role.
#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleResponse),
        (status = 400, description = "Validation failed or id mismatch", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<RoleResponse> {
    debug!("Update role request: {}", id);

    let role_id: RoleId = parse_id("role", &id)?;
    let response = state.role_service.update_role(role_id, request).await?;
    ok(response)
}

/// Delete a role; users holding it lose the link.
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete role request: {}", id);

    let role_id: RoleId = parse_id("role", &id)?;
    state.role_service.delete_role(role_id).await?;

    Ok(no_content())
}
