use crate::models::DispatchOutcome;
use serde::Serialize;
use thiserror::Error;

/// Field-level validation failure reported by request validation.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type.
///
/// Covers the three failure families of the relay pipeline (no channel
/// configured, rendering, delivery) plus the request and startup errors of
/// the surrounding service.
#[derive(Error, Debug)]
pub enum AppError {
    /// No notification channel has credentials configured
    #[error("No notification channel configured, alert not sent")]
    NoChannelConfigured,

    /// A required field is missing from an alert in a webhook payload
    #[error("Cannot render alert #{alert_index}: missing {field}")]
    Rendering { field: String, alert_index: usize },

    /// At least one channel failed to deliver the message
    ///
    /// `channel` and `detail` describe the first failure observed; `outcomes`
    /// keeps every channel's result.
    #[error("Failed to deliver message via {channel}: {detail}")]
    Delivery {
        channel: String,
        detail: String,
        outcomes: Vec<DispatchOutcome>,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Validation errors collected from a request body
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<crate::logger::LoggerError> for AppError {
    fn from(error: crate::logger::LoggerError) -> Self {
        match error {
            crate::logger::LoggerError::Config { message } => AppError::Validation {
                field: "level".to_string(),
                reason: message,
            },
            other => AppError::Internal {
                source: other.into(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: collected }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
