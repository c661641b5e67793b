//! Alertmanager webhook rendering.
//!
//! Turns a grouped webhook payload into a single [`NotificationMessage`].
//! Rendering is pure: no I/O, no shared state, same input gives the same
//! bytes.

use crate::error::{AppError, AppResult};
use crate::models::{AlertEvent, AlertGroup, AlertStatus, NotificationMessage, value_as_text};
use crate::utils::html::anchor;

/// Group name attached to every message rendered from a webhook.
pub const ALERTMANAGER_GROUP: &str = "Alertmanager";

/// Labels that already appear in the summary line.
const SUMMARY_LABELS: [&str; 2] = ["severity", "summary"];

/// Renders an alert group into a message.
///
/// # Errors
/// `AppError::Rendering` when an alert lacks the `severity` label or the
/// `summary` annotation. Nothing is rendered in that case.
pub fn render(group: &AlertGroup) -> AppResult<NotificationMessage> {
    let (firing, resolved): (Vec<_>, Vec<_>) = group
        .alerts
        .iter()
        .enumerate()
        .partition(|(_, alert)| alert.status == AlertStatus::Firing);

    let title = render_title(group, firing.len());

    let mut body = String::new();
    render_section("Alerts Firing", &firing, &mut body)?;
    render_section("Alerts Resolved", &resolved, &mut body)?;

    let link = format!("{}/#/alerts?receiver={}", group.external_url, group.receiver);

    Ok(NotificationMessage::new(body)
        .with_title(title)
        .with_url(link)
        .with_group(ALERTMANAGER_GROUP))
}

fn render_title(group: &AlertGroup, firing_count: usize) -> String {
    let mut title = match group.status {
        AlertStatus::Firing => format!("[FIRING: {}]", firing_count),
        status => format!("[{}]", status.as_str().to_uppercase()),
    };

    for (key, value) in &group.group_labels {
        title.push_str(&format!(" {}:{}", key, value_as_text(value)));
    }

    title
}

fn render_section(
    header: &str,
    alerts: &[(usize, &AlertEvent)],
    out: &mut String,
) -> AppResult<()> {
    if alerts.is_empty() {
        return Ok(());
    }

    out.push_str(header);
    out.push('\n');
    for (index, alert) in alerts {
        render_alert(*index, alert, out)?;
    }
    Ok(())
}

fn render_alert(index: usize, alert: &AlertEvent, out: &mut String) -> AppResult<()> {
    let severity = alert.label("severity").ok_or_else(|| AppError::Rendering {
        field: "label 'severity'".to_string(),
        alert_index: index,
    })?;
    let summary = alert
        .annotation("summary")
        .ok_or_else(|| AppError::Rendering {
            field: "annotation 'summary'".to_string(),
            alert_index: index,
        })?;

    out.push_str(&format!("[{}] {}\n", severity.to_uppercase(), summary));
    out.push_str(&format!(
        "Graph:  {}\n",
        anchor(&alert.generator_url, "Grafana URL")
    ));
    out.push_str("Details:\n");
    for (label, value) in &alert.labels {
        if SUMMARY_LABELS.contains(&label.as_str()) {
            continue;
        }
        out.push_str(&format!("  - {}: {}\n", label, value_as_text(value)));
    }
    Ok(())
}
