//! Telegram Bot API channel

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::notification::channel::{NotificationChannel, SendResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram channel configuration
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,
    /// Chat ID
    pub chat_id: String,
    /// Bot API base URL
    pub api_base: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.telegram_token.clone(), config.telegram_chat_id.clone())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramChannel {
    client: Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BotError::Messaging(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.token
        )
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<SendResult> {
        debug!(chat_id = %self.config.chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: &self.config.chat_id,
                text,
            })
            .send()
            .await
            // reqwest errors embed the URL, which carries the bot token
            .map_err(|e| BotError::Messaging(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => {
                info!(chat_id = %self.config.chat_id, message = %text, "Telegram message sent");
                Ok(SendResult::Sent)
            }
            Some(ApiResponse { description, .. }) => Err(BotError::Messaging(format!(
                "status {}: {}",
                status.as_u16(),
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(BotError::Messaging(format!(
                "status {}: unreadable response",
                status.as_u16()
            ))),
        }
    }
}
