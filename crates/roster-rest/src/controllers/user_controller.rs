//! User management controller.

use crate::{
    controllers::parse_id,
    extractors::{UserListQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use roster_core::{ErrorResponse, RoleId, UserId};
use roster_service::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/roles/:role_id", post(add_user_role))
}

/// List users with filtering, sorting, and pagination.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "A page of users", body = UserListResponse),
        (status = 400, description = "Unknown sort field or bad page size", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<UserListResponse> {
    debug!("List users request");

    let response = state.user_service.list_users(query.into()).await?;
    ok(response)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Create user request: {}", request.email);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user with its roles", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id: UserId = parse_id("user", &id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Update a user's profile and reconcile its roles.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User or role not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id: UserId = parse_id("user", &id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

/// Assign a single role to a user.
#[utoipa::path(
    post,
    path = "/api/users/{id}/roles/{role_id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("role_id" = i64, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role assigned", body = UserResponse),
        (status = 400, description = "Role already assigned", body = ErrorResponse),
        (status = 404, description = "User or role not found", body = ErrorResponse)
    )
)]
pub async fn add_user_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(String, String)>,
) -> ApiResult<UserResponse> {
    debug!("Add role request: {} -> {}", id, role_id);

    let user_id: UserId = parse_id("user", &id)?;
    let role_id: RoleId = parse_id("role", &role_id)?;
    let response = state.user_service.add_user_role(user_id, role_id).await?;
    ok(response)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id: UserId = parse_id("user", &id)?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}
