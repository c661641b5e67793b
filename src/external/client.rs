//! Shared outbound HTTP transport for notification channels.
//!
//! One `reqwest::Client` (one connection pool) is built from
//! [`ChannelsConfig`] and shared by every provider. Connection-level failures
//! are retried up to `max_retries` extra times; any HTTP response, whatever
//! its status, is returned to the caller for classification.

use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::config::ChannelsConfig;
use crate::error::{AppError, AppResult};

/// Failure to obtain any HTTP response from a channel
///
/// The request URL is stripped from `source` because channel URLs carry
/// credentials (Bark device keys, Telegram bot tokens).
#[derive(Debug, Error)]
#[error("request failed after {attempts} attempt(s): {source}")]
pub struct TransportError {
    pub attempts: u32,
    #[source]
    pub source: reqwest::Error,
}

impl TransportError {
    fn new(attempts: u32, source: reqwest::Error) -> Self {
        Self {
            attempts,
            source: source.without_url(),
        }
    }
}

/// Raw answer of a channel endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status_code: u16,
    pub body: String,
    /// Wall time including retries
    pub duration_ms: u64,
}

impl ProviderResponse {
    /// `[200, 300)`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Pooled HTTP client with connect-failure retries
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpTransport {
    pub fn from_config(config: &ChannelsConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .pool_max_idle_per_host(config.max_workers)
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true)
            .user_agent(format!("alerthub-rs/{}", crate::pkg_version()));

        if let Some(proxy) = config.proxy_url() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| AppError::Configuration {
                key: "channels.proxy".to_string(),
                source: anyhow::Error::new(e.without_url()),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| AppError::Configuration {
            key: "channels".to_string(),
            source: anyhow::Error::new(e),
        })?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// POST `body` as JSON to `url`
    pub async fn post_json<T>(&self, url: &str, body: &T) -> Result<ProviderResponse, TransportError>
    where
        T: Serialize + ?Sized,
    {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.client.post(url).json(body).send().await {
                Ok(response) => {
                    let status_code = response.status().as_u16();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| TransportError::new(attempts, e))?;
                    return Ok(ProviderResponse {
                        status_code,
                        body,
                        duration_ms: start.elapsed().as_millis() as u64,
                    });
                }
                Err(e) if e.is_connect() && attempts <= self.max_retries => {
                    tracing::warn!(
                        attempt = attempts,
                        max_retries = self.max_retries,
                        error = %e.without_url(),
                        "Connection failed, retrying"
                    );
                }
                Err(e) => return Err(TransportError::new(attempts, e)),
            }
        }
    }
}
