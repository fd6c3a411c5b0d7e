//! WASM bindings for availability-engine.
//!
//! Exposes range building, intersection, subtraction, and the full bookable
//! range pipeline to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::availability::parse_timezone;
use availability_engine::{AvailabilityRule, DateRange, Metadata, Participant};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DateRangeDto<'a> {
    start: String,
    end: String,
    #[serde(skip_serializing_if = "is_empty")]
    metadata: &'a Metadata,
}

impl<'a> From<&'a DateRange> for DateRangeDto<'a> {
    fn from(r: &'a DateRange) -> Self {
        Self {
            start: r.start.to_rfc3339(),
            end: r.end.to_rfc3339(),
            metadata: &r.metadata,
        }
    }
}

/// Input format for ranges passed from JavaScript.
#[derive(Deserialize)]
struct DateRangeInput {
    start: String,
    end: String,
    #[serde(default)]
    metadata: Metadata,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g., "2026-03-10T09:00:00-04:00")
/// and naive time (e.g., "2026-03-10T13:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_ranges(json: &str) -> Result<Vec<DateRange>, JsValue> {
    let inputs: Vec<DateRangeInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid ranges JSON: {}", e)))?;
    inputs.into_iter().map(into_range).collect()
}

fn is_empty(metadata: &&Metadata) -> bool {
    metadata.is_empty()
}

fn into_range(input: DateRangeInput) -> Result<DateRange, JsValue> {
    let start = parse_datetime(&input.start)?;
    let end = parse_datetime(&input.end)?;
    let mut range = DateRange::new(start, end).map_err(js_err)?;
    range.metadata = input.metadata;
    Ok(range)
}

fn ranges_to_json(ranges: &[DateRange]) -> Result<String, JsValue> {
    let dtos: Vec<DateRangeDto<'_>> = ranges.iter().map(DateRangeDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand an availability rule set into concrete ranges inside a window.
///
/// # Arguments
/// - `rules_json` -- JSON array of rules, each tagged with `"kind"`
///   (`"working_hours"` or `"date_override"`)
/// - `timezone` -- IANA timezone the rules are written in
/// - `date_from` / `date_to` -- ISO 8601 window bounds
#[wasm_bindgen(js_name = "buildDateRanges")]
pub fn build_date_ranges(
    rules_json: &str,
    timezone: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, JsValue> {
    let rules: Vec<AvailabilityRule> = serde_json::from_str(rules_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rules JSON: {}", e)))?;
    let tz = parse_timezone(timezone).map_err(js_err)?;
    let from = parse_datetime(date_from)?;
    let to = parse_datetime(date_to)?;

    let ranges = availability_engine::build_date_ranges(&rules, &tz, from, to).map_err(js_err)?;
    ranges_to_json(&ranges)
}

/// Intersect a JSON array of range arrays (one per participant).
#[wasm_bindgen(js_name = "intersect")]
pub fn intersect(range_lists_json: &str) -> Result<String, JsValue> {
    let inputs: Vec<Vec<DateRangeInput>> = serde_json::from_str(range_lists_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid range lists JSON: {}", e)))?;
    let lists = inputs
        .into_iter()
        .map(|list| list.into_iter().map(into_range).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;

    ranges_to_json(&availability_engine::intersect(&lists))
}

/// Remove `excluded_json` ranges from `source_json` ranges, keeping each
/// source range's `metadata` on its surviving fragments.
#[wasm_bindgen(js_name = "subtract")]
pub fn subtract(source_json: &str, excluded_json: &str) -> Result<String, JsValue> {
    let source = parse_ranges(source_json)?;
    let excluded = parse_ranges(excluded_json)?;

    ranges_to_json(&availability_engine::subtract(&source, &excluded))
}

/// Compute the ranges every participant can attend, minus busy time.
///
/// `participants_json` is a JSON array of
/// `{participant_id, timezone, rules}` objects; `busy_json` a JSON array of
/// `{start, end}` objects. Returns the bookable ranges as a JSON array.
#[wasm_bindgen(js_name = "findBookableRanges")]
pub fn find_bookable_ranges(
    participants_json: &str,
    busy_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    let participants: Vec<Participant> = serde_json::from_str(participants_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid participants JSON: {}", e)))?;
    let busy = parse_ranges(busy_json)?;
    let ws = parse_datetime(window_start)?;
    let we = parse_datetime(window_end)?;

    let result =
        availability_engine::find_bookable_ranges(&participants, &busy, ws, we).map_err(js_err)?;
    ranges_to_json(&result.ranges)
}
