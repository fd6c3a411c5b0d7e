//! JSON request documents accepted by the `avail` subcommands.

use availability_engine::{AvailabilityRule, DateRange, Participant};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Input of `avail build`.
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    pub timezone: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub rules: Vec<AvailabilityRule>,
}

/// Input of `avail subtract`.
#[derive(Debug, Deserialize)]
pub struct SubtractRequest {
    pub source: Vec<DateRange>,
    #[serde(default)]
    pub excluded: Vec<DateRange>,
}

/// Input of `avail bookable`.
#[derive(Debug, Deserialize)]
pub struct BookableRequest {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub busy: Vec<DateRange>,
}

/// Input of `avail intersect`: one range list per participant.
pub type IntersectRequest = Vec<Vec<DateRange>>;
