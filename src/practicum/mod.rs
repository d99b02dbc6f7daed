//! Practicum homework review API
//!
//! - `client`: authenticated GET of `homework_statuses`
//! - `response`: shape validation of the returned payload
//! - `status`: status code to verdict text

pub mod client;
pub mod response;
pub mod status;

pub use client::{HomeworkSource, PracticumClient};
pub use response::{check_response, current_date};
pub use status::{parse_status, HomeworkStatus};
