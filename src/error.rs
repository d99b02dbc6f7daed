//! Error taxonomy shared by every stage of the poll loop

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, BotError>;

/// Coarse error classification, used for logging and retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials or unreadable env file, fatal before the loop starts
    Config,
    /// Network failure or non-200 answer from the review API
    Connectivity,
    /// Payload does not have the expected structure
    Shape,
    /// Payload is well-formed but its content is not understood
    Domain,
    /// The bot API refused or failed to deliver a message
    Messaging,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Shape => "shape",
            ErrorKind::Domain => "domain",
            ErrorKind::Messaging => "messaging",
        }
    }

    /// Worth retrying sooner than the regular poll period
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Connectivity | ErrorKind::Messaging)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("required environment variables are missing: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),

    #[error("cannot read env file {path}: {message}")]
    EnvFile { path: String, message: String },

    #[error("{0}")]
    Connectivity(String),

    #[error("unexpected API response: {0}")]
    Shape(String),

    #[error("{0}")]
    Domain(String),

    #[error("Telegram delivery failed: {0}")]
    Messaging(String),
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::MissingTokens(_) | BotError::EnvFile { .. } => ErrorKind::Config,
            BotError::Connectivity(_) => ErrorKind::Connectivity,
            BotError::Shape(_) => ErrorKind::Shape,
            BotError::Domain(_) => ErrorKind::Domain,
            BotError::Messaging(_) => ErrorKind::Messaging,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}
