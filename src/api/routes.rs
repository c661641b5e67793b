//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Path the generated OpenAPI document is served on
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Compression
/// 2. Request ID - generates/propagates request IDs, stamps error bodies
/// 3. Logging - logs requests with request IDs
/// 4. Error body normalization for non-handler errors (404, 405, 408)
/// 5. Request timeout from `server.request_timeout`
///
/// # Routes
/// - `POST /alert`, `POST /alertmanager-webhook` - Alert relay
/// - `/health`, `/health/live`, `/health/ready` - Health checks
/// - `GET|PUT /log-level` - Runtime log filter
/// - `GET /api-docs/openapi.json` - OpenAPI document
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::alerts::alert_routes())
        .merge(handlers::health::health_routes())
        .merge(handlers::log_level::log_level_routes())
        .split_for_parts();

    let request_timeout = Duration::from_secs(state.settings.server.request_timeout);

    router
        .route(
            OPENAPI_PATH,
            get(move || {
                let api = api.clone();
                async move { Json(api) }
            }),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}
