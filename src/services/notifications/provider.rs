//! Core notification provider trait.
//!
//! A provider turns a [`NotificationMessage`] into one HTTP call to its
//! channel. Classification of the answer (delivered or not) is left to the
//! dispatcher.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::external::{ProviderResponse, TransportError};
use crate::models::NotificationMessage;

/// Outbound notification channel (Bark, Telegram, ...)
///
/// Uses `async_trait` so providers can be held as `Arc<dyn NotificationProvider>`
/// and moved into spawned tasks.
///
/// # Example Implementation
/// ```ignore
/// #[async_trait]
/// impl NotificationProvider for WebhookProvider {
///     async fn send(&self, message: &NotificationMessage) -> Result<ProviderResponse, TransportError> {
///         self.transport.post_json(&self.url, &json!({"text": message.body})).await
///     }
///
///     fn name(&self) -> &'static str {
///         "webhook"
///     }
/// }
/// ```
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends one message and returns the endpoint's raw answer
    ///
    /// Non-2xx answers are returned as `Ok`; only the absence of any answer
    /// is a [`TransportError`].
    async fn send(&self, message: &NotificationMessage) -> Result<ProviderResponse, TransportError>;

    /// Stable channel name used in logs and outcomes
    fn name(&self) -> &'static str;

    /// Checks provider settings without contacting the channel
    fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
