//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Marker value of the `result` field on every error body
pub const FAILED_RESULT: &str = "failed";

/// Standard error response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "message": "Failed to deliver message via telegram: HTTP 503: unavailable",
    "type": "DispatchFailure",
    "result": "failed",
    "request_id": "3f0c1a4e-8a57-4a39-9d8e-2f1b7f0c9e11"
}))]
pub struct ErrorResponse {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with type and message.
    pub fn new(error_type: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: error_type.to_string(),
            result: FAILED_RESULT.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_error_body() {
        let body = serde_json::to_value(ErrorResponse::new("RenderingError", "missing")).unwrap();
        assert_eq!(
            body,
            json!({"message": "missing", "type": "RenderingError", "result": "failed"})
        );
    }

    #[test]
    fn test_error_body_with_details_and_request_id() {
        let body = serde_json::to_value(
            ErrorResponse::new("BadRequest", "bad")
                .with_details(json!({"field": "body"}))
                .with_request_id("req-1"),
        )
        .unwrap();
        assert_eq!(body["details"]["field"], "body");
        assert_eq!(body["request_id"], "req-1");
    }
}
