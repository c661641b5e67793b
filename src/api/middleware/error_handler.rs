//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.
//! The rendered [`ErrorResponse`] is also stored in the response extensions
//! so the request ID middleware can stamp it afterwards.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoChannelConfigured
            | AppError::Rendering { .. }
            | AppError::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } | AppError::ValidationErrors { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `type` field in the error body
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NoChannelConfigured | AppError::Configuration { .. } => "ConfigurationError",
            AppError::Rendering { .. } => "RenderingError",
            AppError::Delivery { .. } => "DispatchFailure",
            AppError::Validation { .. } | AppError::ValidationErrors { .. } => "ValidationError",
            AppError::BadRequest { .. } => "BadRequest",
            AppError::Internal { .. } => "InternalError",
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let error_type = self.error_type();
        match self {
            AppError::NoChannelConfigured => ErrorResponse::new(error_type, self.to_string()),
            AppError::Rendering { field, alert_index } => {
                ErrorResponse::new(error_type, self.to_string()).with_details(json!({
                    "field": field,
                    "alert_index": alert_index
                }))
            }
            AppError::Delivery {
                channel, outcomes, ..
            } => ErrorResponse::new(error_type, self.to_string()).with_details(json!({
                "channel": channel,
                "outcomes": outcomes
            })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new(error_type, self.to_string()).with_details(json!({
                    "field": field,
                    "reason": reason
                }))
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(error_type, self.to_string()).with_details(json!({
                    "errors": errors
                }))
            }
            AppError::BadRequest { message } => ErrorResponse::new(error_type, message.clone()),
            AppError::Configuration { key, .. } => ErrorResponse::new(
                error_type,
                format!("Configuration error: {}", key),
            )
            .with_details(json!({ "key": key })),
            // Source chains may carry internal detail; they go to the log only
            AppError::Internal { .. } => {
                ErrorResponse::new(error_type, "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, error_type = self.error_type(), "Request failed");
        } else {
            tracing::warn!(error = %self, error_type = self.error_type(), "Request rejected");
        }

        error_response(status, self.to_error_response())
    }
}

/// Builds a JSON error response and records the body in its extensions.
pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    let mut response = (status, Json(body.clone())).into_response();
    response.extensions_mut().insert(body);
    response
}

/// Middleware that gives non-JSON error responses the standard error body.
///
/// Covers responses produced outside the handlers, such as 404 for unknown
/// routes, 405 and the 408 of the timeout layer.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error())
        || response.extensions().get::<ErrorResponse>().is_some()
    {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, 64 * 1024)
        .await
        .unwrap_or_default();
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let message = if original_message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        original_message
    };

    let error_type = if status.is_server_error() {
        "InternalError"
    } else {
        "BadRequest"
    };

    error_response(status, ErrorResponse::new(error_type, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use crate::models::DispatchOutcome;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NoChannelConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Rendering {
                    field: "label 'severity'".to_string(),
                    alert_index: 0,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::BadRequest {
                    message: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ValidationErrors { errors: Vec::new() },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_no_channel_body() {
        let response = AppError::NoChannelConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<ErrorResponse>().is_some());

        let body = body_json(response).await;
        assert_eq!(body["type"], "ConfigurationError");
        assert_eq!(body["result"], "failed");
        assert_eq!(
            body["message"],
            "No notification channel configured, alert not sent"
        );
    }

    #[tokio::test]
    async fn test_delivery_body_carries_outcomes() {
        let error = AppError::Delivery {
            channel: "telegram".to_string(),
            detail: "HTTP 503: down".to_string(),
            outcomes: vec![DispatchOutcome {
                channel: "telegram".to_string(),
                delivered: false,
                status_code: Some(503),
                detail: "HTTP 503: down".to_string(),
                duration_ms: 3,
            }],
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["type"], "DispatchFailure");
        assert_eq!(
            body["message"],
            "Failed to deliver message via telegram: HTTP 503: down"
        );
        assert_eq!(body["details"]["outcomes"][0]["status_code"], 503);
    }

    #[tokio::test]
    async fn test_rendering_body() {
        let error = AppError::Rendering {
            field: "annotation 'summary'".to_string(),
            alert_index: 3,
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["type"], "RenderingError");
        assert_eq!(body["details"]["alert_index"], 3);
    }

    #[tokio::test]
    async fn test_validation_errors_body() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "body".to_string(),
                message: "Body cannot be empty".to_string(),
            }],
        };
        let body = body_json(error.into_response()).await;
        assert_eq!(body["type"], "ValidationError");
        assert_eq!(body["details"]["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_internal_error_hides_source() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("token=secret"),
        };
        let body = body_json(error.into_response()).await;
        assert_eq!(body["type"], "InternalError");
        assert!(!body.to_string().contains("secret"));
    }
}
