//! Notification channel trait

use crate::error::Result;

/// Send result
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// Delivered to the chat
    Sent,
    /// Intentionally not delivered (e.g. dry run)
    Skipped(String),
}

/// A fixed-destination text channel
#[allow(async_fn_in_trait)]
pub trait NotificationChannel {
    /// Channel name (for logs)
    fn name(&self) -> &str;

    /// Send plain text to the configured chat
    async fn send(&self, text: &str) -> Result<SendResult>;
}
