//! Command-line arguments and the run entry point

use crate::config::Config;
use crate::error::Result;
use crate::notification::{ConsoleChannel, NotificationChannel, TelegramChannel, TelegramConfig};
use crate::practicum::{HomeworkSource, PracticumClient};
use crate::watcher::{HomeworkWatcher, PollOutcome};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relay Practicum homework review status changes to Telegram")]
#[command(version)]
pub struct Cli {
    /// dotenv file with PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID
    /// (default: ./.env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,
    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
    /// Initial cursor as a Unix timestamp (default: now)
    #[arg(long)]
    pub from_date: Option<i64>,
}

impl Cli {
    /// `--from-date` if given, otherwise `now`
    pub fn initial_cursor(&self, now: i64) -> i64 {
        self.from_date.unwrap_or(now)
    }
}

/// Load config, build the client and channel, then poll
pub async fn handle_run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.env_file.as_deref())?;
    let client = PracticumClient::from_config(&config)?;
    let cursor = cli.initial_cursor(chrono::Utc::now().timestamp());

    if cli.dry_run {
        info!("Dry-run mode: notifications are logged, not sent");
        let mut watcher = HomeworkWatcher::new(client, ConsoleChannel::new(), cursor);
        drive(&mut watcher, cli.once).await;
    } else {
        let channel = TelegramChannel::new(TelegramConfig::from_config(&config))?;
        let mut watcher = HomeworkWatcher::new(client, channel, cursor);
        drive(&mut watcher, cli.once).await;
    }

    Ok(())
}

/// Single tick when `once`, otherwise the endless loop
pub async fn drive<S, C>(watcher: &mut HomeworkWatcher<S, C>, once: bool) -> Option<PollOutcome>
where
    S: HomeworkSource,
    C: NotificationChannel,
{
    if once {
        let outcome = watcher.tick().await;
        info!(outcome = ?outcome, cursor = watcher.cursor(), "Single poll finished");
        Some(outcome)
    } else {
        watcher.run().await;
        None
    }
}
