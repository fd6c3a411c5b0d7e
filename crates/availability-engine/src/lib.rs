//! # availability-engine
//!
//! Timezone-correct availability computation for meeting scheduling.
//!
//! Participants describe when they can meet with recurring weekly working
//! hours plus single-date overrides, written in their own timezone. This
//! crate expands those rules into absolute time ranges inside a query window,
//! intersects the ranges of several participants, and subtracts time that is
//! already booked. DST transitions are handled by resolving every rule time
//! as local wall-clock time via `chrono-tz`.
//!
//! All functions are pure: timezone and window are always explicit
//! parameters and nothing reads the system clock.
//!
//! ## Modules
//!
//! - [`rule`] — Rule value types (`TimeOfDay`, `WeekdaySet`, rule variants)
//! - [`range`] — The `DateRange` interval type with pass-through metadata
//! - [`dst`] — Wall-clock → instant resolution across DST transitions
//! - [`expander`] — One rule → concrete ranges
//! - [`builder`] — Full rule set → merged per-date ranges (overrides win)
//! - [`combinator`] — Intersection, subtraction, and merging of range lists
//! - [`availability`] — Multi-participant pipeline
//! - [`error`] — Error types

pub mod availability;
pub mod builder;
pub mod combinator;
pub mod dst;
pub mod error;
pub mod expander;
pub mod range;
pub mod rule;

pub use availability::{find_bookable_ranges, BookableAvailability, Participant};
pub use builder::{build_date_ranges, group_by_date};
pub use combinator::{intersect, merge_overlapping, subtract};
pub use error::AvailabilityError;
pub use expander::{expand_date_override, expand_working_hours};
pub use range::{DateRange, Metadata};
pub use rule::{AvailabilityRule, DateOverrideRule, TimeOfDay, WeekdaySet, WorkingHoursRule};
