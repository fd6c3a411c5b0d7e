//! The `DateRange` value type shared by every stage of the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Caller-supplied key/value data carried through the engine untouched
/// (e.g. `{"hostId": 7}`).
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A half-open interval `[start, end)` of absolute time.
///
/// `start <= end` always holds. A range with `start == end` is *degenerate*:
/// it covers no instants and only serves as a day-cancellation marker while
/// overrides are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

/// Unvalidated wire form; deserialization goes through [`DateRange::new`].
#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    metadata: Metadata,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AvailabilityError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        let mut range = DateRange::new(raw.start, raw.end)?;
        range.metadata = raw.metadata;
        Ok(range)
    }
}

impl DateRange {
    /// Create a range without metadata.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidRange`] if `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AvailabilityError::InvalidRange { start, end });
        }
        Ok(Self::unchecked(start, end))
    }

    /// Internal constructor for call sites that already established `start <= end`.
    pub(crate) fn unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "range start {start} after end {end}");
        Self {
            start,
            end,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry, replacing any previous value under `key`.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Same metadata, new bounds. Used when a range is clipped or split.
    pub(crate) fn fragment(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "fragment start {start} after end {end}");
        Self {
            start,
            end,
            metadata: self.metadata.clone(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// True when the two ranges share at least one instant.
    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Calendar date of `start` as observed in `tz`.
    pub fn date_key(&self, tz: &Tz) -> NaiveDate {
        self.start.with_timezone(tz).date_naive()
    }
}
