//! Runtime log level handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::LOGGING_TAG;
use crate::api::dto::{ErrorResponse, LogLevelRequest, LogLevelResponse};
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the log level routes
///
/// # Routes
/// - `GET /log-level` - Active filter
/// - `PUT /log-level` - Replace the filter until the next restart
pub fn log_level_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_log_level, set_log_level))
}

/// GET /log-level - Active log filter
#[utoipa::path(
    get,
    path = "/log-level",
    tag = LOGGING_TAG,
    responses(
        (status = 200, description = "Active filter directives", body = LogLevelResponse),
        (status = 500, description = "Logging is not reloadable in this process", body = ErrorResponse)
    )
)]
async fn get_log_level(State(state): State<AppState>) -> AppResult<Json<LogLevelResponse>> {
    let handle = reload_handle(&state)?;
    let level = handle.current_level().ok_or_else(|| AppError::Internal {
        source: anyhow::anyhow!("log subscriber is no longer installed"),
    })?;
    Ok(Json(LogLevelResponse { level }))
}

/// PUT /log-level - Replace the log filter
///
/// Accepts a level name (`debug`) or full `EnvFilter` directives
/// (`alerthub_rs=trace,warn`).
#[utoipa::path(
    put,
    path = "/log-level",
    tag = LOGGING_TAG,
    request_body = LogLevelRequest,
    responses(
        (status = 200, description = "Filter replaced", body = LogLevelResponse),
        (status = 400, description = "Invalid filter directive", body = ErrorResponse),
        (status = 500, description = "Logging is not reloadable in this process", body = ErrorResponse)
    )
)]
async fn set_log_level(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LogLevelRequest>,
) -> AppResult<Json<LogLevelResponse>> {
    let handle = reload_handle(&state)?;
    handle.set_level(&payload.level)?;
    tracing::info!(level = %payload.level, "Log level changed");

    let level = handle.current_level().unwrap_or(payload.level);
    Ok(Json(LogLevelResponse { level }))
}

fn reload_handle(state: &AppState) -> AppResult<&LogLevelHandle> {
    state
        .log_level
        .as_ref()
        .ok_or_else(|| AppError::Configuration {
            key: "logger".to_string(),
            source: anyhow::anyhow!("no reloadable log subscriber installed"),
        })
}
