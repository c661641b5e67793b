//! Telegram Bot API provider.
//!
//! Messages are sent with `sendMessage` in HTML parse mode so that the links
//! built by the renderer stay clickable.

use async_trait::async_trait;
use serde::Serialize;

use super::provider::NotificationProvider;
use crate::config::TelegramSettings;
use crate::error::{AppError, AppResult};
use crate::external::{HttpTransport, ProviderResponse, TransportError};
use crate::models::NotificationMessage;
use crate::utils::html::anchor;

/// Group label used when a titled message has no group
const UNKNOWN_GROUP: &str = "UNKNOWN";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    text: String,
    chat_id: &'a str,
    disable_web_page_preview: bool,
    parse_mode: &'static str,
}

/// Telegram chat provider
#[derive(Clone)]
pub struct TelegramProvider {
    settings: TelegramSettings,
    transport: HttpTransport,
}

impl TelegramProvider {
    pub fn new(settings: TelegramSettings, transport: HttpTransport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.bot_token.trim()
        )
    }

    /// `[group] title` header, body, then an HTML link to the message URL
    fn build_text(message: &NotificationMessage) -> String {
        let mut text = String::new();
        if let Some(title) = message.title() {
            let group = message.group().unwrap_or(UNKNOWN_GROUP);
            text.push_str(&format!("[{}] {}\n", group, title));
        }
        text.push_str(&message.body);
        if let Some(url) = message.url() {
            text.push_str("\nURL: ");
            text.push_str(&anchor(url, "Link"));
        }
        text
    }

    fn build_request<'a>(&'a self, message: &NotificationMessage) -> SendMessageRequest<'a> {
        SendMessageRequest {
            text: Self::build_text(message),
            chat_id: &self.settings.chat_id,
            disable_web_page_preview: true,
            parse_mode: "HTML",
        }
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    async fn send(&self, message: &NotificationMessage) -> Result<ProviderResponse, TransportError> {
        let request = self.build_request(message);
        tracing::debug!(channel = "telegram", text = %request.text, "Sending Telegram message");
        self.transport.post_json(&self.api_url(), &request).await
    }

    fn name(&self) -> &'static str {
        "telegram"
    }

    fn validate_config(&self) -> AppResult<()> {
        if !self.settings.is_configured() {
            return Err(AppError::Validation {
                field: "channels.telegram.bot_token".to_string(),
                reason: "Bot token is required".to_string(),
            });
        }
        if self.settings.chat_id.trim().is_empty() {
            return Err(AppError::Validation {
                field: "channels.telegram.chat_id".to_string(),
                reason: "Chat id is required".to_string(),
            });
        }
        Ok(())
    }
}
