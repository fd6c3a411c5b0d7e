//! Interval-set algebra over [`DateRange`] lists.
//!
//! - [`intersect`] — time covered by every list simultaneously
//! - [`subtract`] — remove excluded time, keeping each fragment's metadata
//! - [`merge_overlapping`] — coalesce into a sorted, non-overlapping list
//!
//! All ranges are half-open: `[start, end)`. Ranges that merely touch do not
//! intersect.

use crate::range::DateRange;

/// Intersect N range lists (typically one per participant).
///
/// The first list seeds a running intersection; every following list replaces
/// it with the pairwise overlaps `[max(a.start, b.start), min(a.end, b.end))`
/// that are non-empty. Each surviving fragment keeps the metadata of the
/// running-side range `a`.
///
/// An empty `range_lists`, or any empty member list, yields an empty result.
pub fn intersect(range_lists: &[Vec<DateRange>]) -> Vec<DateRange> {
    let Some((first, rest)) = range_lists.split_first() else {
        return Vec::new();
    };

    let mut running = first.clone();
    for candidates in rest {
        if running.is_empty() {
            break;
        }
        running = running
            .iter()
            .flat_map(|a| {
                candidates.iter().filter_map(move |b| {
                    let start = a.start.max(b.start);
                    let end = a.end.min(b.end);
                    (start < end).then(|| a.fragment(start, end))
                })
            })
            .collect();
    }

    running
}

/// Remove every instant covered by `excluded` from `source`.
///
/// Each source range is processed independently: the excluded ranges that
/// overlap it are sorted by start and swept left to right, emitting the gaps
/// between them. Excluded ranges need not be sorted or disjoint. Degenerate
/// (zero-length) exclusions cover no instants and are ignored, so they never
/// split a source range into touching fragments. Fragments
/// carry their source range's metadata; a source with no overlapping
/// exclusion is returned unchanged.
pub fn subtract(source: &[DateRange], excluded: &[DateRange]) -> Vec<DateRange> {
    let mut fragments = Vec::with_capacity(source.len());

    for src in source {
        let mut overlapping: Vec<&DateRange> = excluded
            .iter()
            .filter(|e| e.start < src.end && e.end > src.start && !e.is_degenerate())
            .collect();

        if overlapping.is_empty() {
            fragments.push(src.clone());
            continue;
        }

        overlapping.sort_by_key(|e| e.start);

        let mut cursor = src.start;
        for e in overlapping {
            if e.start > cursor {
                fragments.push(src.fragment(cursor, e.start));
            }
            cursor = cursor.max(e.end);
        }

        if src.end > cursor {
            fragments.push(src.fragment(cursor, src.end));
        }
    }

    fragments
}

/// Merge overlapping or adjacent ranges.
///
/// Returns a list sorted by start with no two ranges overlapping or touching.
/// A merged range keeps the metadata of the earliest range in its run.
/// Degenerate ranges are dropped.
pub fn merge_overlapping(ranges: &[DateRange]) -> Vec<DateRange> {
    let mut sorted: Vec<&DateRange> = ranges.iter().filter(|r| !r.is_degenerate()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }

    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<DateRange> = Vec::new();
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                // Overlapping or adjacent — extend the current range.
                last.end = last.end.max(range.end);
                continue;
            }
        }
        merged.push(range.clone());
    }

    merged
}
