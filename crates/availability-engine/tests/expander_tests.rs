//! Tests for rule expansion: working-hours days, overrides, clipping, DST.

use availability_engine::expander::{expand_date_override, expand_working_hours};
use availability_engine::rule::{DateOverrideRule, TimeOfDay, WeekdaySet, WorkingHoursRule};
use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Asia::Tokyo;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

fn working_hours(days: &[u8], start: TimeOfDay, end: TimeOfDay) -> WorkingHoursRule {
    WorkingHoursRule {
        days: WeekdaySet::from_ordinals(days.iter().copied()).unwrap(),
        start_time: start,
        end_time: end,
    }
}

fn date_override(date: &str, start: TimeOfDay, end: TimeOfDay) -> DateOverrideRule {
    DateOverrideRule {
        date: date.parse::<NaiveDate>().unwrap(),
        start_time: start,
        end_time: end,
    }
}

// ── Working hours ───────────────────────────────────────────────────────────

#[test]
fn weekday_rule_yields_one_range_per_matching_day() {
    // Mon 2026-03-16 .. Mon 2026-03-23, New York midnight to midnight (EDT).
    let rule = working_hours(&[1, 2, 3, 4, 5], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T04:00:00Z"),
        utc("2026-03-23T04:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 5, "Mon-Fri only");
    assert_eq!(ranges[0].start, utc("2026-03-16T13:00:00Z"));
    assert_eq!(ranges[0].end, utc("2026-03-16T21:00:00Z"));
    assert_eq!(ranges[4].start, utc("2026-03-20T13:00:00Z"));
    for pair in ranges.windows(2) {
        assert!(pair[0].start < pair[1].start, "ascending date order");
    }
}

#[test]
fn weekday_is_observed_in_the_participant_timezone() {
    // 2026-03-15T15:00Z is Sunday in UTC but Monday 00:00 in Tokyo.
    let rule = working_hours(&[1], hm(9, 0), hm(10, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &Tokyo,
        utc("2026-03-15T15:00:00Z"),
        utc("2026-03-16T15:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].start, utc("2026-03-16T00:00:00Z"));
    assert_eq!(ranges[0].end, utc("2026-03-16T01:00:00Z"));
}

#[test]
fn range_is_truncated_at_window_end() {
    let rule = working_hours(&[1], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T04:00:00Z"),
        utc("2026-03-16T18:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].start, utc("2026-03-16T13:00:00Z"));
    assert_eq!(ranges[0].end, utc("2026-03-16T18:00:00Z"));
}

#[test]
fn range_starts_no_earlier_than_window_start() {
    let rule = working_hours(&[1], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T15:00:00Z"),
        utc("2026-03-17T04:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].start, utc("2026-03-16T15:00:00Z"));
    assert_eq!(ranges[0].end, utc("2026-03-16T21:00:00Z"));
}

#[test]
fn day_already_over_at_window_start_is_skipped() {
    // Window opens at 18:00 EDT, after Monday's 09:00-17:00.
    let rule = working_hours(&[1, 2, 3, 4, 5], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T22:00:00Z"),
        utc("2026-03-17T04:00:00Z"),
    )
    .collect();

    assert!(ranges.is_empty());
}

#[test]
fn no_matching_weekday_yields_nothing() {
    let rule = working_hours(&[6], hm(9, 0), hm(17, 0));
    let count = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T04:00:00Z"),
        utc("2026-03-21T04:00:00Z"),
    )
    .count();

    assert_eq!(count, 0, "Saturday is outside Mon-Fri window");
}

#[test]
fn expansion_is_restartable() {
    let rule = working_hours(&[0, 1, 2, 3, 4, 5, 6], hm(8, 0), hm(12, 0));
    let expansion = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-16T04:00:00Z"),
        utc("2026-03-20T04:00:00Z"),
    );

    let first: Vec<_> = expansion.clone().collect();
    let second: Vec<_> = expansion.collect();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

// ── DST ─────────────────────────────────────────────────────────────────────

#[test]
fn spring_forward_keeps_local_nine_to_five() {
    // New York springs forward on Sunday 2026-03-08.
    let rule = working_hours(&[0, 1, 2, 3, 4, 5, 6], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-07T05:00:00Z"),
        utc("2026-03-10T04:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 3);
    // Saturday, still EST.
    assert_eq!(ranges[0].start, utc("2026-03-07T14:00:00Z"));
    assert_eq!(ranges[0].end, utc("2026-03-07T22:00:00Z"));
    // Transition day, already EDT by 09:00.
    assert_eq!(ranges[1].start, utc("2026-03-08T13:00:00Z"));
    assert_eq!(ranges[1].end, utc("2026-03-08T21:00:00Z"));

    for range in &ranges {
        assert_eq!(range.start.with_timezone(&New_York).hour(), 9);
        assert_eq!(range.end.with_timezone(&New_York).hour(), 17);
    }
}

#[test]
fn fall_back_keeps_local_nine_to_five() {
    // New York falls back on Sunday 2026-11-01.
    let rule = working_hours(&[0, 1, 2, 3, 4, 5, 6], hm(9, 0), hm(17, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-10-31T04:00:00Z"),
        utc("2026-11-03T05:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].start, utc("2026-10-31T13:00:00Z"));
    assert_eq!(ranges[1].start, utc("2026-11-01T14:00:00Z"));
    assert_eq!(ranges[1].end, utc("2026-11-01T22:00:00Z"));
    assert_eq!(ranges[2].start, utc("2026-11-02T14:00:00Z"));

    for range in &ranges {
        assert_eq!(range.start.with_timezone(&New_York).hour(), 9);
        assert_eq!(range.end.with_timezone(&New_York).hour(), 17);
    }
}

#[test]
fn range_spanning_the_transition_is_an_hour_shorter() {
    // 00:30-12:00 on the spring-forward day covers the missing hour.
    let rule = working_hours(&[0], hm(0, 30), hm(12, 0));
    let ranges: Vec<_> = expand_working_hours(
        &rule,
        &New_York,
        utc("2026-03-08T05:00:00Z"),
        utc("2026-03-09T04:00:00Z"),
    )
    .collect();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].duration_minutes(), 10 * 60 + 30);
    assert_eq!(ranges[0].end.with_timezone(&New_York).hour(), 12);
}

// ── Date overrides ──────────────────────────────────────────────────────────

#[test]
fn override_expands_to_local_wall_clock() {
    let range = expand_date_override(&date_override("2026-03-10", hm(10, 0), hm(12, 0)), &New_York);
    assert_eq!(range.start, utc("2026-03-10T14:00:00Z"));
    assert_eq!(range.end, utc("2026-03-10T16:00:00Z"));
}

#[test]
fn end_of_day_sentinel_runs_to_next_local_midnight() {
    let range = expand_date_override(
        &date_override("2026-03-10", TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY),
        &New_York,
    );
    assert_eq!(range.start, utc("2026-03-10T04:00:00Z"));
    assert_eq!(range.end, utc("2026-03-11T04:00:00Z"));
}

#[test]
fn end_of_day_sentinel_on_spring_forward_day_is_23_hours() {
    let range = expand_date_override(
        &date_override("2026-03-08", TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY),
        &New_York,
    );
    assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0).unwrap());
    assert_eq!(range.end, Utc.with_ymd_and_hms(2026, 3, 9, 4, 0, 0).unwrap());
    assert_eq!(range.duration_minutes(), 23 * 60);
}

#[test]
fn equal_times_produce_a_degenerate_cancellation() {
    let range = expand_date_override(
        &date_override("2026-03-10", TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT),
        &New_York,
    );
    assert!(range.is_degenerate());

    // 23:59-23:59 is also a cancellation, not a one-minute slot.
    let range = expand_date_override(
        &date_override("2026-03-10", TimeOfDay::END_OF_DAY, TimeOfDay::END_OF_DAY),
        &New_York,
    );
    assert!(range.is_degenerate());
}

#[test]
fn inverted_override_collapses_to_degenerate() {
    let range = expand_date_override(&date_override("2026-03-10", hm(17, 0), hm(9, 0)), &New_York);
    assert!(range.is_degenerate());
    assert_eq!(range.start, utc("2026-03-10T21:00:00Z"));
}
