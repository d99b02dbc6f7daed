//! Homework Status Bot CLI
//!
//! Polls the Practicum review API and sends status changes to a Telegram chat.

use anyhow::Result;
use clap::Parser;
use homework_status_bot::cli::{handle_run, Cli};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default filter, e.g. RUST_LOG=debug homework-bot
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=info,homework_bot=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = handle_run(cli).await {
        error!(kind = %e.kind(), error = %e, "Homework bot stopped");
        return Err(e.into());
    }

    Ok(())
}
