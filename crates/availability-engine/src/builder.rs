//! Build a participant's availability from a full rule set.
//!
//! Working-hours rules and date overrides are expanded separately, bucketed by
//! local calendar date, and merged so that any date carrying an override loses
//! all of its working-hours ranges. A zero-length override therefore cancels a
//! day: it claims the date during the merge and is dropped afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::error::{AvailabilityError, Result};
use crate::expander::{expand_date_override, expand_working_hours};
use crate::range::DateRange;
use crate::rule::{AvailabilityRule, DateOverrideRule, WorkingHoursRule};

/// Expand `rules` into the concrete ranges available inside `[date_from, date_to)`.
///
/// Output is ordered by local date (in `tz`), then by expansion order within a
/// date. Every returned range lies inside the window and has `start < end`.
///
/// Overrides are considered when their date falls within one day either side
/// of the window's UTC dates, since a local date near the window edge can sit
/// on a different UTC date.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidWindow`] if `date_from > date_to`.
pub fn build_date_ranges(
    rules: &[AvailabilityRule],
    tz: &Tz,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
) -> Result<Vec<DateRange>> {
    if date_from > date_to {
        return Err(AvailabilityError::InvalidWindow {
            from: date_from,
            to: date_to,
        });
    }

    let mut working_hours: Vec<&WorkingHoursRule> = Vec::new();
    let mut overrides: Vec<&DateOverrideRule> = Vec::new();
    for rule in rules {
        match rule {
            AvailabilityRule::WorkingHours(r) => working_hours.push(r),
            AvailabilityRule::DateOverride(r) => overrides.push(r),
        }
    }

    let working_ranges: Vec<DateRange> = working_hours
        .iter()
        .flat_map(|rule| expand_working_hours(rule, tz, date_from, date_to))
        .collect();

    // Saturate so open-ended windows at the calendar limits stay valid.
    let first_override_date = date_from
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN);
    let last_override_date = date_to
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);
    let override_ranges: Vec<DateRange> = overrides
        .iter()
        .filter(|rule| (first_override_date..=last_override_date).contains(&rule.date))
        .map(|rule| expand_date_override(rule, tz))
        .collect();

    debug!(
        timezone = %tz,
        working_hours_rules = working_hours.len(),
        override_rules = overrides.len(),
        working_ranges = working_ranges.len(),
        override_ranges = override_ranges.len(),
        "Expanded availability rules"
    );

    let mut by_date = group_by_date(working_ranges, tz);
    for (date, ranges) in group_by_date(override_ranges, tz) {
        if by_date.insert(date, ranges).is_some() {
            trace!(%date, "Override replaced working hours");
        }
    }

    let ranges: Vec<DateRange> = by_date
        .into_values()
        .flatten()
        .filter_map(|range| {
            let start = range.start.max(date_from);
            let end = range.end.min(date_to);
            (start < end).then(|| range.fragment(start, end))
        })
        .collect();

    debug!(ranges = ranges.len(), "Built date ranges");
    Ok(ranges)
}

/// Bucket ranges by the local calendar date (in `tz`) of their start.
///
/// Ranges sharing a date keep their encounter order. Keys iterate in
/// ascending date order and display as `YYYY-MM-DD`.
pub fn group_by_date(
    ranges: impl IntoIterator<Item = DateRange>,
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<DateRange>> {
    let mut groups: BTreeMap<NaiveDate, Vec<DateRange>> = BTreeMap::new();
    for range in ranges {
        groups.entry(range.date_key(tz)).or_default().push(range);
    }
    groups
}
