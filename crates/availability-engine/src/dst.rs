//! DST-aware wall-clock resolution.
//!
//! Working-hours rules are written in local wall-clock time ("09:00–17:00"),
//! but a day that contains a DST transition does not have 24 hours. Adding
//! nine hours to local midnight on a spring-forward day lands on 10:00, not
//! 09:00. These helpers anchor at local midnight and then correct by the
//! difference between the offset at midnight and the offset in effect at the
//! intended wall-clock time.
//!
//! Transition edge cases:
//!
//! - A wall-clock time inside a spring-forward gap (e.g. 02:30 on the day
//!   clocks jump 02:00 → 03:00) does not exist; it shifts forward by the
//!   length of the gap (02:30 → 03:30).
//! - A wall-clock time repeated by a fall-back transition resolves to its
//!   first occurrence.

use chrono::{
    DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::rule::TimeOfDay;

/// UTC offset in effect in `tz` at `instant`, in seconds east of UTC.
pub fn offset_seconds(tz: &Tz, instant: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
}

/// The first instant of `date` in `tz`.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // Zones such as America/Santiago have jumped over midnight itself; the
        // day then starts at the end of the gap, which is midnight read with
        // the pre-transition offset.
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(
                    &naive
                        .checked_sub_days(Days::new(1))
                        .unwrap_or(NaiveDateTime::MIN),
                )
                .fix()
                .local_minus_utc();
            (naive - Duration::seconds(i64::from(before))).and_utc()
        }
    }
}

/// The instant at which the wall clock in `tz` reads `time` on `date`.
pub fn wall_clock_instant(tz: &Tz, date: NaiveDate, time: TimeOfDay) -> DateTime<Utc> {
    let midnight = local_midnight(tz, date);
    let raw = midnight + time.since_midnight();

    let wall_clock = date.and_time(time.to_naive_time());
    let intended_offset = match tz.offset_from_local_datetime(&wall_clock) {
        LocalResult::Single(offset) | LocalResult::Ambiguous(offset, _) => {
            offset.fix().local_minus_utc()
        }
        // Inside a gap: midnight arithmetic already yields the shifted-forward time.
        LocalResult::None => return raw,
    };

    let delta = offset_seconds(tz, midnight) - intended_offset;
    raw + Duration::seconds(i64::from(delta))
}
