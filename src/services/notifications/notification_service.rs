//! Notification service: channel registration and message relay.

use std::sync::Arc;

use super::bark_provider::BarkProvider;
use super::dispatcher::Dispatcher;
use super::provider::NotificationProvider;
use super::telegram_provider::TelegramProvider;
use crate::config::ChannelsConfig;
use crate::error::AppResult;
use crate::external::HttpTransport;
use crate::models::{AlertGroup, DispatchReport, NotificationMessage};
use crate::services::alertmanager;

/// Relays messages to every configured channel
///
/// Cloning is cheap; providers, the worker semaphore and the HTTP pool are
/// shared.
#[derive(Clone)]
pub struct NotificationService {
    dispatcher: Dispatcher,
}

impl NotificationService {
    /// Registers a provider for each channel that has credentials
    pub fn from_config(config: &ChannelsConfig) -> AppResult<Self> {
        let transport = HttpTransport::from_config(config)?;
        let mut providers: Vec<Arc<dyn NotificationProvider>> = Vec::new();

        if config.bark.is_configured() {
            providers.push(Arc::new(BarkProvider::new(
                config.bark.clone(),
                transport.clone(),
            )));
        }
        if config.telegram.is_configured() {
            providers.push(Arc::new(TelegramProvider::new(
                config.telegram.clone(),
                transport.clone(),
            )));
        }

        for provider in &providers {
            provider.validate_config()?;
        }

        if providers.is_empty() {
            tracing::warn!("No notification channel configured; alerts will be rejected");
        } else {
            tracing::info!(
                channels = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
                max_workers = config.max_workers,
                max_retries = transport.max_retries(),
                proxy = config.proxy_url().is_some(),
                "Notification channels registered"
            );
        }

        Ok(Self::with_providers(providers, config.max_workers))
    }

    pub fn with_providers(providers: Vec<Arc<dyn NotificationProvider>>, max_workers: usize) -> Self {
        Self {
            dispatcher: Dispatcher::new(providers, max_workers),
        }
    }

    /// Names of the registered channels
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.dispatcher.channel_names()
    }

    pub fn has_channels(&self) -> bool {
        self.dispatcher.has_channels()
    }

    /// Sends a message as-is to every channel
    pub async fn send(&self, message: &NotificationMessage) -> AppResult<DispatchReport> {
        tracing::debug!(
            title = ?message.title(),
            group = ?message.group(),
            body_len = message.body.len(),
            "Dispatching message"
        );
        self.dispatcher.dispatch(message).await
    }

    /// Renders an Alertmanager group and sends the result
    ///
    /// Rendering failures are returned before any channel is contacted.
    pub async fn send_alert_group(&self, group: &AlertGroup) -> AppResult<DispatchReport> {
        let message = alertmanager::render(group)?;
        tracing::debug!(
            receiver = %group.receiver,
            status = %group.status,
            alerts = group.alerts.len(),
            "Rendered Alertmanager group"
        );
        self.send(&message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::external::{ProviderResponse, TransportError};
    use crate::models::AlertEvent;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingProvider {
        messages: Mutex<Vec<NotificationMessage>>,
    }

    #[async_trait]
    impl NotificationProvider for RecordingProvider {
        async fn send(
            &self,
            message: &NotificationMessage,
        ) -> Result<ProviderResponse, TransportError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(ProviderResponse {
                status_code: 200,
                body: "ok".to_string(),
                duration_ms: 1,
            })
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn service_with(provider: Arc<RecordingProvider>) -> NotificationService {
        NotificationService::with_providers(vec![provider as Arc<dyn NotificationProvider>], 5)
    }

    fn alert_group(alerts: Vec<AlertEvent>) -> AlertGroup {
        serde_json::from_value(serde_json::json!({
            "status": "firing",
            "receiver": "ops",
            "groupLabels": {"alertname": "HighCPU"},
            "externalURL": "http://am:9093",
            "alerts": alerts,
        }))
        .unwrap()
    }

    fn firing_alert(labels: serde_json::Value) -> AlertEvent {
        serde_json::from_value(serde_json::json!({
            "status": "firing",
            "labels": labels,
            "annotations": {"summary": "CPU high"},
            "startsAt": "2024-01-15T10:30:00Z",
            "endsAt": "0001-01-01T00:00:00Z",
            "generatorURL": "http://prom/graph",
        }))
        .unwrap()
    }

    #[test]
    fn test_from_config_registers_configured_channels_only() {
        let mut config = ChannelsConfig::default();
        let service = NotificationService::from_config(&config).unwrap();
        assert!(!service.has_channels());

        config.bark.key = "device".to_string();
        let service = NotificationService::from_config(&config).unwrap();
        assert_eq!(service.channel_names(), vec!["bark"]);

        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.chat_id = "42".to_string();
        let service = NotificationService::from_config(&config).unwrap();
        assert_eq!(service.channel_names(), vec!["bark", "telegram"]);
    }

    #[test]
    fn test_from_config_rejects_incomplete_telegram() {
        let mut config = ChannelsConfig::default();
        config.telegram.bot_token = "123:abc".to_string();
        assert!(matches!(
            NotificationService::from_config(&config),
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_service_rejects_send() {
        let service = NotificationService::from_config(&ChannelsConfig::default()).unwrap();
        let result = service.send(&NotificationMessage::new("x")).await;
        assert!(matches!(result, Err(AppError::NoChannelConfigured)));
    }

    #[tokio::test]
    async fn test_send_alert_group_renders_then_dispatches() {
        let provider = Arc::new(RecordingProvider::default());
        let service = service_with(provider.clone());

        let group = alert_group(vec![firing_alert(
            serde_json::json!({"severity": "critical", "instance": "api-1"}),
        )]);
        let report = service.send_alert_group(&group).await.unwrap();
        assert_eq!(report.failed_count(), 0);

        let messages = provider.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].title(), Some("[FIRING: 1] alertname:HighCPU"));
        assert_eq!(messages[0].group(), Some("Alertmanager"));
        assert!(messages[0].body.contains("  - instance: api-1\n"));
    }

    #[tokio::test]
    async fn test_render_failure_sends_nothing() {
        let provider = Arc::new(RecordingProvider::default());
        let service = service_with(provider.clone());

        let group = alert_group(vec![firing_alert(serde_json::json!({"instance": "api-1"}))]);
        let result = service.send_alert_group(&group).await;

        assert!(matches!(result, Err(AppError::Rendering { .. })));
        assert!(provider.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_proxy_carries_every_channel() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device"))
            .and(body_json(serde_json::json!({"body": "ping"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("via-proxy"))
            .expect(1)
            .mount(&proxy)
            .await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("via-proxy"))
            .expect(1)
            .mount(&proxy)
            .await;

        // `.invalid` hosts never resolve, so only the proxy can answer
        let mut config = ChannelsConfig {
            proxy: Some(proxy.uri()),
            max_retries: 0,
            ..Default::default()
        };
        config.bark.key = "device".to_string();
        config.bark.url = "http://bark.invalid".to_string();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.chat_id = "42".to_string();
        config.telegram.api_base = "http://telegram.invalid".to_string();

        let service = NotificationService::from_config(&config).unwrap();
        let report = service.send(&NotificationMessage::new("ping")).await.unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed_count(), 0);
    }
}
