//! Bark notification provider implementation.
//!
//! Sends push notifications to iOS devices via a Bark server.
//!
//! Bark API Reference: https://github.com/Finb/Bark

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Map, Value, json};

use super::provider::NotificationProvider;
use crate::config::BarkSettings;
use crate::error::{AppError, AppResult};
use crate::external::{HttpTransport, ProviderResponse, TransportError};
use crate::models::NotificationMessage;

/// Bark push provider
///
/// Posts `{body, title?, level?, url?, group?}` to `<server>/<device key>`.
#[derive(Clone)]
pub struct BarkProvider {
    settings: BarkSettings,
    transport: HttpTransport,
}

impl BarkProvider {
    pub fn new(settings: BarkSettings, transport: HttpTransport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Push endpoint; a trailing slash on the server URL is tolerated
    fn api_url(&self) -> String {
        format!(
            "{}/{}",
            self.settings.url.trim_end_matches('/'),
            self.settings.key.trim()
        )
    }

    /// Optional keys are present only when non-empty
    fn build_request_body(message: &NotificationMessage) -> Value {
        let mut body = Map::new();
        body.insert("body".to_string(), json!(message.body));

        let optional = [
            ("title", message.title()),
            ("level", message.level()),
            ("url", message.url()),
            ("group", message.group()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                body.insert(key.to_string(), json!(value));
            }
        }

        Value::Object(body)
    }
}

#[async_trait]
impl NotificationProvider for BarkProvider {
    async fn send(&self, message: &NotificationMessage) -> Result<ProviderResponse, TransportError> {
        let body = Self::build_request_body(message);
        tracing::debug!(channel = "bark", payload = %body, "Sending Bark push");
        self.transport.post_json(&self.api_url(), &body).await
    }

    fn name(&self) -> &'static str {
        "bark"
    }

    fn validate_config(&self) -> AppResult<()> {
        if !self.settings.is_configured() {
            return Err(AppError::Validation {
                field: "channels.bark.key".to_string(),
                reason: "Device key is required".to_string(),
            });
        }

        let url = Url::parse(&self.settings.url).map_err(|_| AppError::Validation {
            field: "channels.bark.url".to_string(),
            reason: "Invalid URL format".to_string(),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(AppError::Validation {
                field: "channels.bark.url".to_string(),
                reason: "URL must use http or https protocol".to_string(),
            });
        }

        Ok(())
    }
}
