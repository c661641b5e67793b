//! Alertmanager webhook payload models.
//!
//! Mirrors the JSON body Prometheus Alertmanager posts to webhook receivers.
//! Label and annotation maps keep document order, since that order is
//! visible in rendered messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Ordered string-keyed map as received on the wire.
pub type LabelSet = Map<String, Value>;

/// Alert or group status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single alert instance inside a webhook group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub status: AlertStatus,
    #[schema(value_type = Object)]
    pub labels: LabelSet,
    #[schema(value_type = Object)]
    #[serde(default)]
    pub annotations: LabelSet,
    #[serde(default)]
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: String,
    #[serde(rename = "generatorURL", default)]
    pub generator_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl AlertEvent {
    /// Returns a label rendered as text, if present
    pub fn label(&self, key: &str) -> Option<String> {
        self.labels.get(key).map(value_as_text)
    }

    /// Returns an annotation rendered as text, if present
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.annotations.get(key).map(value_as_text)
    }
}

/// A batch of related alerts as posted by Alertmanager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "version": "4",
    "groupKey": "{}:{alertname=\"HighCPU\"}",
    "truncatedAlerts": 0,
    "status": "firing",
    "receiver": "alerthub",
    "groupLabels": {"job": "api"},
    "commonLabels": {"job": "api", "severity": "critical"},
    "commonAnnotations": {},
    "externalURL": "http://alertmanager:9093",
    "alerts": [{
        "status": "firing",
        "labels": {"severity": "critical", "job": "api", "instance": "api-1:9100"},
        "annotations": {"summary": "CPU high"},
        "startsAt": "2024-01-15T10:30:00Z",
        "endsAt": "0001-01-01T00:00:00Z",
        "generatorURL": "http://prometheus:9090/graph?g0.expr=up"
    }]
}))]
pub struct AlertGroup {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group_key: String,
    #[serde(default)]
    pub truncated_alerts: u64,
    pub status: AlertStatus,
    #[serde(default)]
    pub receiver: String,
    #[schema(value_type = Object)]
    #[serde(default)]
    pub group_labels: LabelSet,
    #[schema(value_type = Object)]
    #[serde(default)]
    pub common_labels: LabelSet,
    #[schema(value_type = Object)]
    #[serde(default)]
    pub common_annotations: LabelSet,
    #[serde(rename = "externalURL", default)]
    pub external_url: String,
    #[serde(default)]
    pub alerts: Vec<AlertEvent>,
}

/// Renders a JSON scalar as plain text; strings are emitted without quotes.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
