//! Poll loop: fetch, validate, parse, deduplicate, notify, sleep
//!
//! The watcher keeps three pieces of state between polls:
//! - `cursor`: `from_date` for the next request, advanced from `current_date`
//!   only after a poll was fully processed
//! - `last_message`: last status text delivered, so an unchanged status is not
//!   sent twice
//! - `last_error`: last failure text reported, so a persisting failure is
//!   reported once; cleared by the next successful poll
//!
//! Nothing is persisted; a restart starts from a fresh cursor.

mod retry;

pub use retry::{RetryPolicy, INITIAL_BACKOFF_SECS, RETRY_PERIOD_SECS};

use crate::error::{BotError, ErrorKind, Result};
use crate::notification::NotificationChannel;
use crate::practicum::{check_response, current_date, parse_status, HomeworkSource};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Prefix of failure notifications
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Status changed and the message was handed to the channel
    Notified,
    /// Latest homework has the same status text as the last one sent
    Unchanged,
    /// `homeworks` list was empty
    NoUpdates,
    /// Poll failed; the failure was logged and reported if appropriate
    Failed(ErrorKind),
}

pub struct HomeworkWatcher<S, C> {
    source: S,
    channel: C,
    cursor: i64,
    last_message: Option<String>,
    last_error: Option<String>,
    retry: RetryPolicy,
}

impl<S, C> HomeworkWatcher<S, C>
where
    S: HomeworkSource,
    C: NotificationChannel,
{
    pub fn new(source: S, channel: C, cursor: i64) -> Self {
        Self {
            source,
            channel,
            cursor,
            last_message: None,
            last_error: None,
            retry: RetryPolicy::new(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Poll forever. Only process termination stops the loop.
    pub async fn run(&mut self) {
        info!(
            channel = self.channel.name(),
            cursor = self.cursor,
            from = %format_cursor(self.cursor),
            period_secs = self.retry.period().as_secs(),
            "Homework watcher started"
        );

        loop {
            let outcome = self.tick().await;
            let delay = self.retry.next_delay(&outcome);
            debug!(
                outcome = ?outcome,
                next_poll_in_secs = delay.as_secs(),
                "Sleeping until next poll"
            );
            sleep(delay).await;
        }
    }

    /// One iteration; never returns an error
    pub async fn tick(&mut self) -> PollOutcome {
        match self.poll().await {
            Ok(outcome) => {
                self.last_error = None;
                outcome
            }
            Err(e) => {
                self.report_failure(&e).await;
                PollOutcome::Failed(e.kind())
            }
        }
    }

    async fn poll(&mut self) -> Result<PollOutcome> {
        let response = self.source.fetch(self.cursor).await?;
        let homeworks = check_response(&response)?;
        let next_cursor = current_date(&response).unwrap_or(self.cursor);

        let Some(latest) = homeworks.first() else {
            debug!(cursor = self.cursor, "No homework status changes");
            self.advance_cursor(next_cursor);
            return Ok(PollOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("Homework status unchanged, skipping notification");
            self.advance_cursor(next_cursor);
            return Ok(PollOutcome::Unchanged);
        }

        // A failed send leaves cursor and last_message untouched so the next
        // poll delivers the same update.
        self.channel.send(&message).await?;
        self.last_message = Some(message);
        self.advance_cursor(next_cursor);
        Ok(PollOutcome::Notified)
    }

    fn advance_cursor(&mut self, next: i64) {
        if next != self.cursor {
            debug!(
                from = self.cursor,
                to = next,
                at = %format_cursor(next),
                "Cursor advanced"
            );
            self.cursor = next;
        }
    }

    async fn report_failure(&mut self, err: &BotError) {
        error!(kind = %err.kind(), error = %err, cursor = self.cursor, "Poll failed");

        // The channel itself failed.
        if err.kind() == ErrorKind::Messaging {
            return;
        }

        let message = format!("{}: {}", FAILURE_PREFIX, err);
        if self.last_error.as_deref() == Some(message.as_str()) {
            debug!("Same failure already reported, skipping notification");
            return;
        }

        if let Err(e) = self.channel.send(&message).await {
            warn!(error = %e, "Failed to report failure");
        }
        self.last_error = Some(message);
    }
}

/// Render a cursor for logs
pub fn format_cursor(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}
