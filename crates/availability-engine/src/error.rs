//! Error types for availability-engine operations.
//!
//! Every variant is a precondition violation on caller input. Runtime
//! conditions such as "no matching weekday" degrade to empty results instead.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("Invalid time of day: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u32, minute: u32 },

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("Invalid weekday ordinal: {0} (expected 0=Sunday..6=Saturday)")]
    InvalidWeekday(u8),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid window: date_from {from} is after date_to {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
