//! Rule expansion: turns a working-hours rule or a date override into
//! concrete [`DateRange`]s in a participant's timezone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::dst::{local_midnight, wall_clock_instant};
use crate::range::DateRange;
use crate::rule::{DateOverrideRule, WorkingHoursRule};

/// Expand a recurring working-hours rule over `[date_from, date_to)`.
///
/// Days are stepped as local calendar days in `tz`, starting from the local
/// date of `date_from` and stopping once a day's local midnight reaches
/// `date_to`. A day is kept when its weekday (as observed in `tz`) is in
/// `rule.days`. The produced range starts at `max(rule start, date_from)` and
/// ends at `min(rule end, date_to)`; days where that end falls before the start
/// are skipped.
///
/// The returned iterator is lazy and `Clone`; cloning it before consumption
/// restarts the expansion.
///
/// # Arguments
/// - `rule` -- the recurring rule to expand
/// - `tz` -- the participant's IANA timezone
/// - `date_from` -- inclusive window start
/// - `date_to` -- exclusive window end
pub fn expand_working_hours(
    rule: &WorkingHoursRule,
    tz: &Tz,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
) -> WorkingHoursExpansion {
    WorkingHoursExpansion {
        rule: rule.clone(),
        tz: *tz,
        date_from,
        date_to,
        next_day: Some(date_from.with_timezone(tz).date_naive()),
    }
}

/// Lazy iterator returned by [`expand_working_hours`].
#[derive(Debug, Clone)]
pub struct WorkingHoursExpansion {
    rule: WorkingHoursRule,
    tz: Tz,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
    next_day: Option<NaiveDate>,
}

impl Iterator for WorkingHoursExpansion {
    type Item = DateRange;

    fn next(&mut self) -> Option<DateRange> {
        while let Some(day) = self.next_day {
            if local_midnight(&self.tz, day) >= self.date_to {
                self.next_day = None;
                break;
            }
            self.next_day = day.succ_opt();

            if !self.rule.days.contains(day.weekday()) {
                continue;
            }

            let start = wall_clock_instant(&self.tz, day, self.rule.start_time).max(self.date_from);
            let end = wall_clock_instant(&self.tz, day, self.rule.end_time).min(self.date_to);
            if end < start {
                continue;
            }
            return Some(DateRange::unchecked(start, end));
        }
        None
    }
}

/// Expand a single-date override into exactly one range.
///
/// An `end_time` of 23:59 means "through the end of the day" and ends the
/// range at local midnight of the following date. Equal start and end times
/// yield a degenerate range, which marks the date as unavailable. An end
/// before the start is treated the same way.
pub fn expand_date_override(rule: &DateOverrideRule, tz: &Tz) -> DateRange {
    let start = wall_clock_instant(tz, rule.date, rule.start_time);
    if rule.start_time == rule.end_time {
        return DateRange::unchecked(start, start);
    }

    let end = match rule.date.succ_opt() {
        Some(next) if rule.end_time.is_end_of_day() => local_midnight(tz, next),
        _ => wall_clock_instant(tz, rule.date, rule.end_time),
    };
    DateRange::unchecked(start, end.max(start))
}
