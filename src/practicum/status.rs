//! Review status codes and their verdicts

use crate::error::{BotError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Text shown to the student
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| unexpected_status(s))
    }
}

fn unexpected_status(got: &str) -> BotError {
    let expected: Vec<&str> = HomeworkStatus::ALL.iter().map(|s| s.as_str()).collect();
    BotError::Domain(format!(
        "unexpected homework status `{}`, expected one of: {}",
        got,
        expected.join(", ")
    ))
}

/// Format the notification text for one homework record
pub fn parse_status(homework: &Value) -> Result<String> {
    debug!("Parsing homework status");

    let name = match homework.get(HOMEWORK_NAME_KEY) {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(BotError::Domain(format!(
                "`{}` must be a string, got {}",
                HOMEWORK_NAME_KEY, other
            )))
        }
        None => {
            return Err(BotError::Domain(format!(
                "homework record has no `{}`",
                HOMEWORK_NAME_KEY
            )))
        }
    };

    let status: HomeworkStatus = match homework.get(STATUS_KEY) {
        Some(Value::String(code)) => code.parse()?,
        Some(other) => return Err(unexpected_status(&other.to_string())),
        None => return Err(unexpected_status("<missing>")),
    };

    debug!(homework = %name, status = %status, "Homework status parsed");
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
