//! Concurrent fan-out of one message to every configured channel.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use super::provider::NotificationProvider;
use crate::error::{AppError, AppResult};
use crate::external::{ProviderResponse, TransportError};
use crate::models::{DispatchOutcome, DispatchReport, NotificationMessage};

type SendResult = (Result<ProviderResponse, TransportError>, u64);

/// Sends messages through all registered providers at once
///
/// Each channel gets its own task. A semaphore shared by every dispatch
/// caps the number of sends in flight at `max_workers`.
#[derive(Clone)]
pub struct Dispatcher {
    providers: Vec<Arc<dyn NotificationProvider>>,
    permits: Arc<Semaphore>,
    max_workers: usize,
}

impl Dispatcher {
    pub fn new(providers: Vec<Arc<dyn NotificationProvider>>, max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            providers,
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn has_channels(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Delivers `message` to every channel and waits for all of them
    ///
    /// # Errors
    /// - `NoChannelConfigured` when no provider is registered; nothing is sent
    /// - `Delivery` when any channel fails, naming the first failure in
    ///   completion order and carrying every outcome
    pub async fn dispatch(&self, message: &NotificationMessage) -> AppResult<DispatchReport> {
        if self.providers.is_empty() {
            return Err(AppError::NoChannelConfigured);
        }

        let message = Arc::new(message.clone());
        let mut pending: FuturesUnordered<_> = self
            .providers
            .iter()
            .map(|provider| {
                let channel = provider.name();
                let handle = tokio::spawn(send_with_permit(
                    provider.clone(),
                    self.permits.clone(),
                    message.clone(),
                ));
                async move { (channel, handle.await) }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(self.providers.len());
        while let Some((channel, joined)) = pending.next().await {
            let outcome = classify(channel, joined);
            if outcome.delivered {
                tracing::info!(
                    channel = %outcome.channel,
                    status = ?outcome.status_code,
                    duration_ms = outcome.duration_ms,
                    response = %outcome.detail,
                    "Sent message"
                );
            } else {
                tracing::error!(
                    channel = %outcome.channel,
                    status = ?outcome.status_code,
                    duration_ms = outcome.duration_ms,
                    detail = %outcome.detail,
                    "Failed to send message"
                );
            }
            outcomes.push(outcome);
        }

        let report = DispatchReport { outcomes };
        match report.first_failure() {
            Some(failure) => {
                tracing::warn!(
                    failed = report.failed_count(),
                    total = report.outcomes.len(),
                    first_failed_channel = %failure.channel,
                    "Dispatch incomplete"
                );
                Err(AppError::Delivery {
                    channel: failure.channel.clone(),
                    detail: failure.detail.clone(),
                    outcomes: report.outcomes,
                })
            }
            None => Ok(report),
        }
    }
}

async fn send_with_permit(
    provider: Arc<dyn NotificationProvider>,
    permits: Arc<Semaphore>,
    message: Arc<NotificationMessage>,
) -> SendResult {
    // The semaphore is never closed, so acquisition only fails if that changes.
    let _permit = permits.acquire_owned().await.ok();
    let start = Instant::now();
    let result = provider.send(&message).await;
    (result, start.elapsed().as_millis() as u64)
}

fn classify(channel: &'static str, joined: Result<SendResult, JoinError>) -> DispatchOutcome {
    match joined {
        Ok((Ok(response), _)) if response.is_success() => DispatchOutcome {
            channel: channel.to_string(),
            delivered: true,
            status_code: Some(response.status_code),
            detail: response.body,
            duration_ms: response.duration_ms,
        },
        Ok((Ok(response), _)) => DispatchOutcome {
            channel: channel.to_string(),
            delivered: false,
            status_code: Some(response.status_code),
            detail: format!("HTTP {}: {}", response.status_code, response.body),
            duration_ms: response.duration_ms,
        },
        Ok((Err(err), elapsed_ms)) => DispatchOutcome {
            channel: channel.to_string(),
            delivered: false,
            status_code: None,
            detail: err.to_string(),
            duration_ms: elapsed_ms,
        },
        Err(join_error) => DispatchOutcome {
            channel: channel.to_string(),
            delivered: false,
            status_code: None,
            detail: format!("send task aborted: {}", join_error),
            duration_ms: 0,
        },
    }
}
