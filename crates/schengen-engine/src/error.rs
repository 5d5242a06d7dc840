//! Error types for schengen-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid visit to {country}: entry {entry} is after exit {exit}")]
    InvalidVisit {
        country: String,
        entry: NaiveDate,
        exit: NaiveDate,
    },

    #[error("Invalid trip: entry {entry} is after exit {exit}")]
    InvalidTrip { entry: NaiveDate, exit: NaiveDate },

    #[error("Invalid duration: {days} days (must be between 1 and {max})")]
    InvalidDuration { days: u32, max: u32 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
