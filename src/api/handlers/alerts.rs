//! Alert relay handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ALERT_TAG;
use crate::api::dto::{ErrorResponse, SendAlertRequest, SendAlertResponse};
use crate::error::AppResult;
use crate::models::{AlertGroup, NotificationMessage};
use crate::state::AppState;
use crate::utils::validate::{AppJson, ValidatedJson};

/// Creates the alert relay routes
///
/// # Routes
/// - `POST /alert` - Relay a generic alert
/// - `POST /alertmanager-webhook` - Render and relay an Alertmanager group
pub fn alert_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_alert))
        .routes(routes!(alertmanager_webhook))
}

/// POST /alert - Relay a generic alert
///
/// Sends the message unchanged to every configured channel.
#[utoipa::path(
    post,
    path = "/alert",
    tag = ALERT_TAG,
    request_body = SendAlertRequest,
    responses(
        (status = 200, description = "Delivered on every channel", body = SendAlertResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "No channel configured or delivery failed", body = ErrorResponse)
    )
)]
async fn send_alert(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendAlertRequest>,
) -> AppResult<Json<SendAlertResponse>> {
    let message = NotificationMessage::from(payload);
    let report = state.services.notifications.send(&message).await?;
    Ok(Json(report.into()))
}

/// POST /alertmanager-webhook - Relay an Alertmanager notification
///
/// Renders the alert group into one message, then sends it to every
/// configured channel.
#[utoipa::path(
    post,
    path = "/alertmanager-webhook",
    tag = ALERT_TAG,
    request_body = AlertGroup,
    responses(
        (status = 200, description = "Delivered on every channel", body = SendAlertResponse),
        (status = 400, description = "Malformed payload", body = ErrorResponse),
        (status = 500, description = "Rendering or relay failed; `type` names the cause", body = ErrorResponse)
    )
)]
async fn alertmanager_webhook(
    State(state): State<AppState>,
    AppJson(group): AppJson<AlertGroup>,
) -> AppResult<Json<SendAlertResponse>> {
    tracing::info!(
        receiver = %group.receiver,
        status = %group.status,
        alerts = group.alerts.len(),
        "Alertmanager webhook received"
    );
    let report = state.services.notifications.send_alert_group(&group).await?;
    Ok(Json(report.into()))
}
