//! Outbound notifications
//!
//! Every channel implements [`NotificationChannel`]. The watcher owns exactly
//! one channel: Telegram in normal operation, console under `--dry-run`.

pub mod channel;
pub mod channels;

pub use channel::{NotificationChannel, SendResult};
pub use channels::{ConsoleChannel, TelegramChannel, TelegramConfig};
