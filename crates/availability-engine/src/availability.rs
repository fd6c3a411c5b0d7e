//! Multi-participant availability: from each participant's rule set to the
//! ranges every participant can attend and that are not already booked.
//!
//! The flow is one-directional:
//!
//! ```text
//! rules + window ──build──► per-participant ranges ──intersect──► shared ranges
//!                                                                     │
//!                                                  busy ranges ──subtract──► bookable ranges
//! ```
//!
//! Building is independent per participant; intersection is the join point.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::build_date_ranges;
use crate::combinator::{intersect, merge_overlapping, subtract};
use crate::error::{AvailabilityError, Result};
use crate::range::DateRange;
use crate::rule::AvailabilityRule;

/// A meeting participant and the rules describing when they can meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque identifier (e.g., a user id or email).
    pub participant_id: String,
    /// IANA timezone the rules are written in (e.g., "Europe/Berlin").
    pub timezone: String,
    pub rules: Vec<AvailabilityRule>,
}

/// One participant's expanded availability before intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRanges {
    pub participant_id: String,
    /// Sorted, non-overlapping.
    pub ranges: Vec<DateRange>,
}

/// Result of [`find_bookable_ranges`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookableAvailability {
    /// Time every participant is available and nothing is booked.
    pub ranges: Vec<DateRange>,
    /// Each participant's own availability inside the window.
    pub participants: Vec<ParticipantRanges>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidTimezone`] for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
}

/// Expand one participant's rules into sorted, non-overlapping ranges.
///
/// # Errors
/// Fails on an unknown timezone or an inverted window.
pub fn participant_ranges(
    participant: &Participant,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<ParticipantRanges> {
    let tz = parse_timezone(&participant.timezone)?;
    let built = build_date_ranges(&participant.rules, &tz, window_start, window_end)?;
    Ok(ParticipantRanges {
        participant_id: participant.participant_id.clone(),
        ranges: merge_overlapping(&built),
    })
}

/// Compute the ranges in which all `participants` are available, minus `busy`.
///
/// With no participants the result is empty: nobody is available.
///
/// # Arguments
///
/// * `participants` — Everyone who must attend.
/// * `busy` — Already booked or blocked time, in any order, possibly overlapping.
/// * `window_start` — Start of the query window.
/// * `window_end` — End of the query window.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidWindow`] if `window_start > window_end`,
/// or [`AvailabilityError::InvalidTimezone`] if any participant's timezone is unknown.
pub fn find_bookable_ranges(
    participants: &[Participant],
    busy: &[DateRange],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<BookableAvailability> {
    if window_start > window_end {
        return Err(AvailabilityError::InvalidWindow {
            from: window_start,
            to: window_end,
        });
    }

    let per_participant: Vec<ParticipantRanges> = participants
        .iter()
        .map(|p| participant_ranges(p, window_start, window_end))
        .collect::<Result<_>>()?;

    let lists: Vec<Vec<DateRange>> = per_participant.iter().map(|p| p.ranges.clone()).collect();
    let shared = intersect(&lists);
    let ranges = subtract(&shared, busy);

    debug!(
        participants = per_participant.len(),
        shared = shared.len(),
        busy = busy.len(),
        bookable = ranges.len(),
        "Computed bookable ranges"
    );

    Ok(BookableAvailability {
        ranges,
        participants: per_participant,
        window_start,
        window_end,
    })
}
