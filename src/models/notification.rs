//! Notification message and dispatch result models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Channel-agnostic message consumed by every notification provider
///
/// Built either by the Alertmanager renderer or directly from a generic alert
/// submission. Empty optional strings are treated like absent ones by the
/// providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationMessage {
    /// Message body (required)
    pub body: String,
    /// Message title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Severity / interruption level forwarded to push providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Link attached to the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Group name used to bucket messages on the receiving side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Title, if present and non-empty
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// Level, if present and non-empty
    pub fn level(&self) -> Option<&str> {
        non_empty(&self.level)
    }

    /// URL, if present and non-empty
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Group, if present and non-empty
    pub fn group(&self) -> Option<&str> {
        non_empty(&self.group)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Result of sending one message through one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchOutcome {
    /// Provider name ("bark", "telegram")
    pub channel: String,
    /// Whether the provider answered with a 2xx status
    pub delivered: bool,
    /// HTTP status code, absent on transport failures
    pub status_code: Option<u16>,
    /// Response body or error description
    pub detail: String,
    /// Time spent on the send, retries included
    pub duration_ms: u64,
}

/// Per-channel outcomes of one dispatch, in completion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// First non-delivered outcome in completion order
    pub fn first_failure(&self) -> Option<&DispatchOutcome> {
        self.outcomes.iter().find(|o| !o.delivered)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.delivered).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(channel: &str, delivered: bool) -> DispatchOutcome {
        DispatchOutcome {
            channel: channel.to_string(),
            delivered,
            status_code: Some(if delivered { 200 } else { 500 }),
            detail: String::new(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_empty_optionals_are_absent() {
        let message = NotificationMessage::new("body")
            .with_title("")
            .with_group("ops");
        assert_eq!(message.title(), None);
        assert_eq!(message.group(), Some("ops"));
        assert_eq!(message.url(), None);
    }

    #[test]
    fn test_deserialize_minimal_message() {
        let message: NotificationMessage = serde_json::from_str(r#"{"body":"ping"}"#).unwrap();
        assert_eq!(message, NotificationMessage::new("ping"));
    }

    #[test]
    fn test_report_first_failure_uses_completion_order() {
        let report = DispatchReport {
            outcomes: vec![
                outcome("bark", true),
                outcome("telegram", false),
                outcome("other", false),
            ],
        };
        assert_eq!(report.first_failure().unwrap().channel, "telegram");
        assert_eq!(report.failed_count(), 2);
    }
}
