//! homework-bot command-line tests
//!
//! Argument parsing, `--once` and `--dry-run` wiring.

mod common;

use clap::Parser;
use common::{homeworks, FakeChannel, FakeSource, StubServer};
use homework_status_bot::cli::{drive, handle_run, Cli};
use homework_status_bot::{BotError, HomeworkWatcher, PollOutcome};
use std::io::Write;

// ============================================================================
// Argument parsing
// ============================================================================

mod args_parsing {
    use super::*;

    #[test]
    fn test_defaults() {
        // Given: no flags
        let cli = Cli::try_parse_from(["homework-bot"]).unwrap();

        // Then: endless Telegram loop starting now
        assert!(!cli.once);
        assert!(!cli.dry_run);
        assert!(cli.env_file.is_none());
        assert_eq!(cli.from_date, None);
        assert_eq!(cli.initial_cursor(1_700_000_000), 1_700_000_000);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "homework-bot",
            "--once",
            "--dry-run",
            "--env-file",
            "/tmp/bot.env",
            "--from-date",
            "1690000000",
        ])
        .unwrap();

        assert!(cli.once);
        assert!(cli.dry_run);
        assert_eq!(cli.env_file.as_deref(), Some(std::path::Path::new("/tmp/bot.env")));
        assert_eq!(cli.initial_cursor(1_700_000_000), 1_690_000_000);
    }

    #[test]
    fn test_from_date_must_be_integer() {
        assert!(Cli::try_parse_from(["homework-bot", "--from-date", "yesterday"]).is_err());
    }
}

// ============================================================================
// Run modes
// ============================================================================

#[tokio::test]
async fn test_once_polls_a_single_time() {
    // Given: a watcher with a status change pending
    let source = FakeSource::new(vec![Ok(homeworks("hw05.zip", "approved", 1000))]);
    let mut watcher = HomeworkWatcher::new(source, FakeChannel::new(), 500);

    // When: driving with once = true
    let outcome = drive(&mut watcher, true).await;

    // Then: exactly one poll, and drive returns instead of looping
    assert_eq!(outcome, Some(PollOutcome::Notified));
    assert_eq!(watcher.source().calls(), vec![500]);
    assert_eq!(watcher.channel().sent().len(), 1);
}

#[tokio::test]
async fn test_dry_run_once_end_to_end() {
    // Given: a stub review API and an env file pointing at it
    let server = StubServer::start(
        200,
        r#"{"homeworks": [{"homework_name": "hw05.zip", "status": "reviewing"}], "current_date": 1690000600}"#,
    )
    .await;
    let mut env_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(env_file, "PRACTICUM_TOKEN=practicum-secret").unwrap();
    writeln!(env_file, "TELEGRAM_TOKEN=unused").unwrap();
    writeln!(env_file, "TELEGRAM_CHAT_ID=42").unwrap();
    writeln!(env_file, "PRACTICUM_ENDPOINT={}/api/", server.url).unwrap();

    let cli = Cli::try_parse_from([
        "homework-bot",
        "--once",
        "--dry-run",
        "--from-date",
        "1690000000",
        "--env-file",
        env_file.path().to_str().unwrap(),
    ])
    .unwrap();

    // When
    handle_run(cli).await.unwrap();

    // Then: one request with the given cursor; no Telegram call was needed
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/?from_date=1690000000 "));
}

#[tokio::test]
async fn test_unreadable_env_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.env");

    let cli = Cli::try_parse_from([
        "homework-bot",
        "--once",
        "--dry-run",
        "--env-file",
        missing.to_str().unwrap(),
    ])
    .unwrap();

    let err = handle_run(cli).await.unwrap_err();
    assert!(matches!(err, BotError::EnvFile { .. }));
    assert!(err.is_fatal());
}
