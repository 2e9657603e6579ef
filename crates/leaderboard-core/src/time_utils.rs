use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse an activity timestamp into a UTC [`DateTime`].
///
/// Accepts RFC 3339 (with `Z` or an offset), RFC 2822, naive date-times
/// (read as UTC) and bare `YYYY-MM-DD` dates (midnight UTC). Returns `None`
/// for empty or unrecognised strings.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let normalised = match s.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    debug!("could not parse timestamp \"{}\"", s);
    None
}

// ── Ordering ──────────────────────────────────────────────────────────────────

/// Sort key that orders newer timestamps first.
///
/// Unparsable timestamps compare as older than every valid one, so they end
/// up at the tail of a newest-first list.
pub fn recency_key(s: &str) -> Reverse<Option<DateTime<Utc>>> {
    Reverse(parse_timestamp(s))
}

/// Stable newest-first sort of `items` by the timestamp `ts` returns.
///
/// Items with equal timestamps keep their relative order.
pub fn sort_newest_first<T, F>(items: &mut [T], ts: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| recency_key(ts(item)));
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Render a timestamp as `YYYY-MM-DD`, or echo the input when unparsable.
pub fn format_date(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}
