//! Main application router.

use crate::{
    controllers::{health_controller, role_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use roster_config::{AppConfig, ServerConfig};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Swagger UI is mounted only when `server.swagger_enabled` is set, and the
/// per-request `TraceLayer` only when `observability.tracing_enabled` is set.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let server_config = &config.server;
    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest("/roles", role_controller::router());

    let mut router = Router::new()
        // Health endpoints
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/", get(root))
        .with_state(state);

    if server_config.swagger_enabled {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router = router
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TimeoutLayer::new(server_config.request_timeout()));

    if config.observability.tracing_enabled {
        router = router.layer(TraceLayer::new_for_http());
    }

    // The last layer is outermost, so the request id exists before logging runs.
    let router = router
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!(
        swagger = server_config.swagger_enabled,
        "Router created with REST endpoints under /api"
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Roster API"
}
