//! Send command handler
//!
//! Relays a single message from the command line, mainly to check channel
//! credentials end to end.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{DispatchOutcome, DispatchReport, NotificationMessage};
use crate::services::NotificationService;

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Sends the message and prints one line per channel
    ///
    /// # Errors
    /// - No channel configured
    /// - Any channel failed; its outcome is printed before returning
    pub async fn execute(&self, message: NotificationMessage) -> AppResult<DispatchReport> {
        let service = NotificationService::from_config(&self.config.channels)?;

        match service.send(&message).await {
            Ok(report) => {
                print_outcomes(&report.outcomes);
                Ok(report)
            }
            Err(error) => {
                if let AppError::Delivery { outcomes, .. } = &error {
                    print_outcomes(outcomes);
                }
                Err(error)
            }
        }
    }
}

fn print_outcomes(outcomes: &[DispatchOutcome]) {
    for outcome in outcomes {
        println!("{}", format_outcome(outcome));
    }
}

fn format_outcome(outcome: &DispatchOutcome) -> String {
    let mark = if outcome.delivered { "✓" } else { "✗" };
    let status = outcome
        .status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {} [{}] {}ms {}",
        mark, outcome.channel, status, outcome.duration_ms, outcome.detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.channels.bark.key = "device".to_string();
        settings.channels.bark.url = server.uri();
        settings
    }

    #[test]
    fn test_format_outcome() {
        let outcome = DispatchOutcome {
            channel: "telegram".to_string(),
            delivered: false,
            status_code: None,
            detail: "connection refused".to_string(),
            duration_ms: 12,
        };
        assert_eq!(
            format_outcome(&outcome),
            "✗ telegram [-] 12ms connection refused"
        );
    }

    #[tokio::test]
    async fn test_send_without_channels() {
        let handler = SendCommandHandler::new(Settings::default());
        let result = handler.execute(NotificationMessage::new("ping")).await;
        assert!(matches!(result, Err(AppError::NoChannelConfigured)));
    }

    #[tokio::test]
    async fn test_send_through_bark() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device"))
            .and(body_json(json!({"body": "ping", "title": "test"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":200}"#))
            .expect(1)
            .mount(&server)
            .await;
        let handler = SendCommandHandler::new(settings_for(&server));

        let report = handler
            .execute(NotificationMessage::new("ping").with_title("test"))
            .await
            .unwrap();

        assert_eq!(report.failed_count(), 0);
        assert_eq!(report.outcomes[0].status_code, Some(200));
    }

    #[tokio::test]
    async fn test_send_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/device"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad key"))
            .expect(1)
            .mount(&server)
            .await;
        let handler = SendCommandHandler::new(settings_for(&server));

        match handler.execute(NotificationMessage::new("ping")).await {
            Err(AppError::Delivery { channel, detail, .. }) => {
                assert_eq!(channel, "bark");
                assert_eq!(detail, "HTTP 400: bad key");
            }
            other => panic!("Expected Delivery error, got {:?}", other),
        }
    }
}
