//! Delay before the next poll, chosen per outcome
//!
//! - success: fixed period
//! - connectivity / messaging failure: exponential backoff, capped at the period
//! - shape / domain failure: fixed period, a quicker retry would see the same payload

use super::PollOutcome;
use std::time::Duration;

/// Regular poll period (seconds)
pub const RETRY_PERIOD_SECS: u64 = 600;

/// First backoff step after a transient failure (seconds)
pub const INITIAL_BACKOFF_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    period: Duration,
    initial_backoff: Duration,
    max_backoff: Duration,
    consecutive_transient: u32,
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::with_intervals(
            Duration::from_secs(RETRY_PERIOD_SECS),
            Duration::from_secs(INITIAL_BACKOFF_SECS),
            Duration::from_secs(RETRY_PERIOD_SECS),
        )
    }

    pub fn with_intervals(
        period: Duration,
        initial_backoff: Duration,
        max_backoff: Duration,
    ) -> Self {
        Self {
            period,
            initial_backoff,
            max_backoff,
            consecutive_transient: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn consecutive_transient(&self) -> u32 {
        self.consecutive_transient
    }

    /// Record `outcome` and return how long to sleep before the next poll
    pub fn next_delay(&mut self, outcome: &PollOutcome) -> Duration {
        match outcome {
            PollOutcome::Failed(kind) if kind.is_transient() => {
                self.consecutive_transient = self.consecutive_transient.saturating_add(1);
                self.backoff(self.consecutive_transient)
            }
            _ => {
                self.consecutive_transient = 0;
                self.period
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
