//! Credentials and endpoint configuration
//!
//! Values are read once at startup into a [`Config`] that is passed explicitly
//! to the API client and the Telegram channel.
//!
//! Lookup order for every variable:
//! 1. process environment
//! 2. dotenv file (`--env-file`, or `./.env` when present)
//!
//! The dotenv file is parsed into a map and never written into the process
//! environment.

use crate::error::{BotError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";

/// Required variables, in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];

/// Review API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
}

// Tokens stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Build from an arbitrary lookup function. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| is_set(v));

        let [practicum_token, telegram_token, telegram_chat_id] = REQUIRED_VARS.map(get);
        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
                endpoint: get(PRACTICUM_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            }),
            (p, t, c) => {
                let missing = REQUIRED_VARS
                    .into_iter()
                    .zip([p.is_none(), t.is_none(), c.is_none()])
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                Err(BotError::MissingTokens(missing))
            }
        }
    }

    /// Build from the process environment only
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from the process environment, falling back to a dotenv file.
    ///
    /// An explicit `env_file` must be readable; the default `./.env` is
    /// optional.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        Self::load_with(env_file, Path::new(DEFAULT_ENV_FILE), |name| std::env::var(name).ok())
    }

    /// [`Config::load`] with the default env file path and the environment
    /// lookup supplied by the caller
    pub fn load_with<F>(env_file: Option<&Path>, default_env_file: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = match env_file {
            Some(path) => read_env_file(path)?,
            None if default_env_file.is_file() => read_env_file(default_env_file)?,
            None => HashMap::new(),
        };

        Self::from_lookup(|name| {
            env(name)
                .filter(|v| is_set(v))
                .or_else(|| file_vars.get(name).cloned())
        })
    }
}

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Parse a dotenv file into a map
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let env_file_error = |e: dotenv::Error| BotError::EnvFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut vars = HashMap::new();
    for item in dotenv::from_path_iter(path).map_err(env_file_error)? {
        let (key, value) = item.map_err(env_file_error)?;
        vars.insert(key, value);
    }

    debug!(path = %path.display(), count = vars.len(), "Loaded env file");
    Ok(vars)
}
