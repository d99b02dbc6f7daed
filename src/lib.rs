//! Homework Status Bot - relay Practicum review status changes to Telegram

pub mod cli;
pub mod config;
pub mod error;
pub mod notification;
pub mod practicum;
pub mod watcher;

pub use config::Config;
pub use error::{BotError, ErrorKind, Result};
pub use notification::{
    ConsoleChannel, NotificationChannel, SendResult, TelegramChannel, TelegramConfig,
};
pub use practicum::{check_response, parse_status, HomeworkSource, HomeworkStatus, PracticumClient};
pub use watcher::{HomeworkWatcher, PollOutcome, RetryPolicy};
