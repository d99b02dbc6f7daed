//! Payload validation
//!
//! Checks run in a fixed order (object, `homeworks` key, list type) and the
//! first failure is reported. An empty `homeworks` list is valid: it means
//! nothing changed since the cursor.

use crate::error::{BotError, Result};
use serde_json::Value;
use tracing::{debug, warn};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validate the payload and return its `homeworks` list
pub fn check_response(response: &Value) -> Result<&Vec<Value>> {
    debug!("Checking API response");

    let object = response.as_object().ok_or_else(|| {
        BotError::Shape(format!(
            "expected a JSON object, got {}",
            json_type_name(response)
        ))
    })?;

    let homeworks = object.get(HOMEWORKS_KEY).ok_or_else(|| {
        BotError::Shape(format!("key `{}` is missing", HOMEWORKS_KEY))
    })?;

    let list = homeworks.as_array().ok_or_else(|| {
        BotError::Shape(format!(
            "key `{}` holds {} instead of a list",
            HOMEWORKS_KEY,
            json_type_name(homeworks)
        ))
    })?;

    debug!(count = list.len(), "API response is well-formed");
    Ok(list)
}

/// Server-side timestamp to use as the next cursor, if the payload carries one
pub fn current_date(response: &Value) -> Option<i64> {
    let value = response.get(CURRENT_DATE_KEY)?;
    match value.as_i64() {
        Some(ts) => Some(ts),
        None => {
            warn!(value = %value, "`current_date` is not an integer, keeping cursor");
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
