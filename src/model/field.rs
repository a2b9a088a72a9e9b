//! Tolerant readers for loosely typed backend fields. A bad value turns into
//! `None` (with a warning) instead of failing the whole list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::warn;

/// Ids arrive as numbers from some endpoints and strings from others.
pub fn id_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            warn!(value = %other, "Unexpected id value");
            None
        }
    }
}

/// Counts and capacities: numbers and numeric-looking strings are kept as display text.
pub fn quantity_text(value: Option<Value>, field: &str) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Null => None,
        other => {
            warn!(field, value = %other, "Unexpected quantity value");
            None
        }
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for pat in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"].iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pat) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a backend timestamp into local naive time. Offsets are converted into `tz`;
/// naive values are taken as already local.
pub fn parse_local(raw: &str, tz: Tz) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz).naive_local());
    }
    let parsed = parse_naive(s);
    if parsed.is_none() {
        warn!(timestamp = %s, "Unparseable timestamp");
    }
    parsed
}

/// Parse a backend timestamp into an instant. Naive values are read as local time in `tz`.
pub fn parse_instant(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let parsed = parse_naive(s).and_then(|naive| tz.from_local_datetime(&naive).earliest());
    match parsed {
        Some(dt) => Some(dt.with_timezone(&Utc)),
        None => {
            warn!(timestamp = %s, "Unparseable timestamp");
            None
        }
    }
}
