//! Dry-run channel: log instead of sending

use crate::error::Result;
use crate::notification::channel::{NotificationChannel, SendResult};
use tracing::info;

#[derive(Debug, Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, text: &str) -> Result<SendResult> {
        info!(message = %text, "[dry-run] notification");
        Ok(SendResult::Skipped("dry-run".to_string()))
    }
}
