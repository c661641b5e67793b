//! Health check endpoint handlers.
//!
//! The relay has no backing store, so health is a matter of having at least
//! one notification channel to deliver to.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::BTreeMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Channels the relay knows how to deliver to
const KNOWN_CHANNELS: [&str; 2] = ["bark", "telegram"];

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
///
/// Always answers 200; the status is `degraded` when no channel is
/// configured, since every alert would then be rejected.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let registered = state.services.notifications.channel_names();
    let checks = channel_checks(&registered);

    let status = if registered.is_empty() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        version: state.settings.application.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    })
}

/// Readiness check endpoint.
///
/// # Responses
/// - `200 OK` - At least one channel is configured
/// - `503 Service Unavailable` - No channel configured
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "No notification channel configured")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if state.services.notifications.has_channels() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn channel_checks(registered: &[&'static str]) -> BTreeMap<String, ComponentHealth> {
    KNOWN_CHANNELS
        .iter()
        .map(|name| {
            let check = if registered.contains(name) {
                ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Configured".to_string()),
                }
            } else {
                ComponentHealth {
                    status: HealthStatus::Degraded,
                    message: Some("Not configured".to_string()),
                }
            };
            (name.to_string(), check)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn state_with_channels(bark_key: &str) -> AppState {
        let mut settings = Settings::default();
        settings.channels.bark.key = bark_key.to_string();
        AppState::new(settings).unwrap()
    }

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_degraded_without_channels() {
        let Json(response) = health_check(State(state_with_channels(""))).await;
        assert_eq!(response.status, HealthStatus::Degraded);
        assert_eq!(response.checks.len(), 2);
        assert_eq!(response.checks["bark"].status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn test_health_lists_each_channel() {
        let Json(response) = health_check(State(state_with_channels("device"))).await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.checks["bark"].status, HealthStatus::Healthy);
        assert_eq!(
            response.checks["telegram"].message.as_deref(),
            Some("Not configured")
        );
        assert_eq!(response.version, Settings::default().application.version);
    }

    #[tokio::test]
    async fn test_readiness_follows_channel_registration() {
        assert_eq!(
            readiness_check(State(state_with_channels(""))).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            readiness_check(State(state_with_channels("device"))).await,
            StatusCode::OK
        );
    }
}
