//! Availability rule value types: time of day, weekday sets, and the two rule
//! variants (recurring working hours and single-date overrides).
//!
//! All validation happens at construction; once built, a rule cannot fail to
//! expand.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time `HH:MM`, not tied to any date or timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Sentinel meaning "through the end of the day" when used as an override's
    /// end time, since 24:00 is not representable.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay {
        hour: 23,
        minute: 59,
    };

    /// # Errors
    /// Returns [`AvailabilityError::InvalidTimeOfDay`] unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(AvailabilityError::InvalidTimeOfDay { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    pub fn is_end_of_day(self) -> bool {
        self == Self::END_OF_DAY
    }

    /// Offset from midnight.
    pub fn since_midnight(self) -> Duration {
        Duration::hours(i64::from(self.hour)) + Duration::minutes(i64::from(self.minute))
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + self.since_midnight()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = AvailabilityError;

    /// Parses `HH:MM` (a trailing `:SS` of `00` is tolerated).
    fn from_str(s: &str) -> Result<Self> {
        let bad = || AvailabilityError::InvalidTimeFormat(s.to_string());
        let mut parts = s.trim().split(':');
        let hour: u32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let minute: u32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        match parts.next() {
            None | Some("00") => {}
            Some(_) => return Err(bad()),
        }
        if parts.next().is_some() {
            return Err(bad());
        }
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = AvailabilityError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

// ── WeekdaySet ──────────────────────────────────────────────────────────────

/// A set of weekdays stored as a bit mask, bit `n` for ordinal `n`
/// (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const EVERY_DAY: WeekdaySet = WeekdaySet(0b0111_1111);
    /// Monday through Friday.
    pub const WEEKDAYS: WeekdaySet = WeekdaySet(0b0011_1110);

    /// # Errors
    /// Returns [`AvailabilityError::InvalidWeekday`] for any ordinal above 6.
    pub fn from_ordinals(ordinals: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut mask = 0u8;
        for ordinal in ordinals {
            if ordinal > 6 {
                return Err(AvailabilityError::InvalidWeekday(ordinal));
            }
            mask |= 1 << ordinal;
        }
        Ok(Self(mask))
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member ordinals in ascending order.
    pub fn ordinals(self) -> Vec<u8> {
        (0..7).filter(|n| self.0 & (1 << n) != 0).collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = AvailabilityError;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::from_ordinals(value)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(value: WeekdaySet) -> Self {
        value.ordinals()
    }
}

// ── Rules ───────────────────────────────────────────────────────────────────

/// Recurring weekly availability: the same daily window on every listed weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursRule {
    pub days: WeekdaySet,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Availability for one calendar date that replaces every working-hours rule
/// on that date. `start_time == end_time` cancels the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverrideRule {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// One entry of a participant's availability rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvailabilityRule {
    WorkingHours(WorkingHoursRule),
    DateOverride(DateOverrideRule),
}

impl From<WorkingHoursRule> for AvailabilityRule {
    fn from(rule: WorkingHoursRule) -> Self {
        Self::WorkingHours(rule)
    }
}

impl From<DateOverrideRule> for AvailabilityRule {
    fn from(rule: DateOverrideRule) -> Self {
        Self::DateOverride(rule)
    }
}
