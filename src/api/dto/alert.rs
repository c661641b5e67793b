//! Alert submission DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{DispatchOutcome, DispatchReport, NotificationMessage};

/// Generic alert submitted to `POST /alert`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[schema(example = json!({
    "body": "Disk usage above 90% on db-1",
    "title": "Disk alert",
    "level": "timeSensitive",
    "url": "https://grafana.example.com/d/disk",
    "group": "infra"
}))]
pub struct SendAlertRequest {
    /// Message body
    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body: String,
    pub title: Option<String>,
    /// Bark interruption level (active, timeSensitive, passive)
    pub level: Option<String>,
    pub url: Option<String>,
    pub group: Option<String>,
}

impl From<SendAlertRequest> for NotificationMessage {
    fn from(request: SendAlertRequest) -> Self {
        NotificationMessage {
            body: request.body,
            title: request.title,
            level: request.level,
            url: request.url,
            group: request.group,
        }
    }
}

/// Successful relay result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendAlertResponse {
    /// Always "ok"
    pub status: String,
    /// Per-channel outcomes in completion order
    pub outcomes: Vec<DispatchOutcome>,
}

impl From<DispatchReport> for SendAlertResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            status: "ok".to_string(),
            outcomes: report.outcomes,
        }
    }
}
