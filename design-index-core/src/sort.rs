//! Deterministic ordering of index entries.
//!
//! Primary key: `updatedAt` parsed as a date-time, most recent first. Missing or
//! unparseable timestamps rank as the oldest possible value. Ties are broken by
//! title under the Unicode Collation Algorithm with the CLDR root tailoring, so
//! `Éclair` sorts next to `Eclair` and lowercase precedes uppercase.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use feruca::Collator;

use crate::types::NormalizedEntry;

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (`2024-06-01T12:00:00Z`, with offsets), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC, and a bare `YYYY-MM-DD` read as
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Locale-aware title comparison (root locale).
pub fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

/// Full ordering used by [`sort_entries`].
pub fn compare_entries(
    collator: &mut Collator,
    a: &NormalizedEntry,
    b: &NormalizedEntry,
) -> Ordering {
    let a_ts = a.updated_at.as_deref().and_then(parse_timestamp);
    let b_ts = b.updated_at.as_deref().and_then(parse_timestamp);
    // `None < Some(_)`, so reversing puts recent first and unknown last.
    b_ts.cmp(&a_ts)
        .then_with(|| compare_titles(collator, &a.title, &b.title))
}

/// Sort the complete entry list in place.
pub fn sort_entries(entries: &mut [NormalizedEntry]) {
    let mut collator = Collator::default();
    entries.sort_by(|a, b| compare_entries(&mut collator, a, b));
}
