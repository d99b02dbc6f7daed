//! Practicum API client

use crate::config::Config;
use crate::error::{BotError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anything that can answer "what changed since `from_date`"
#[allow(async_fn_in_trait)]
pub trait HomeworkSource {
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Client for the `homework_statuses` endpoint
#[derive(Debug)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Connectivity(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.endpoint.clone(), config.practicum_token.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One GET with `from_date`; transport errors and non-200 answers both
    /// become [`BotError::Connectivity`].
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                BotError::Connectivity(format!(
                    "endpoint {} with from_date={} is unreachable: {}",
                    self.endpoint, from_date, e
                ))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::Connectivity(format!(
                "endpoint {} answered with status {}, expected 200",
                self.endpoint,
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| {
            BotError::Connectivity(format!("failed to read response from {}: {}", self.endpoint, e))
        })?;

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| BotError::Shape(format!("response body is not valid JSON: {}", e)))?;

        debug!(endpoint = %self.endpoint, "Received homework statuses");
        Ok(payload)
    }
}

impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.get_api_answer(from_date).await
    }
}
