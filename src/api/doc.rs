use utoipa::OpenApi;

pub const ALERT_TAG: &str = "Alerts";
pub const HEALTH_TAG: &str = "Health";
pub const LOGGING_TAG: &str = "Logging";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AlertHub",
        description = "Relays alerts and Alertmanager webhooks to Bark and Telegram",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::AlertStatus,
            crate::models::DispatchOutcome,
        )
    ),
    tags(
        (name = ALERT_TAG, description = "Alert relay endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = LOGGING_TAG, description = "Runtime log level"),
    )
)]
pub struct ApiDoc;
