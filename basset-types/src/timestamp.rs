//! Unix-nanosecond instants.
//!
//! Entity values are recorded against nanosecond-precision unix timestamps.
//! Callers may supply an instant either as an integer nanosecond literal or
//! as an RFC 3339 string; both parse to the same `i64` representation.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Current wall time as nanoseconds since the unix epoch.
pub fn unix_now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Parses a timestamp literal.
///
/// Accepts an integer nanosecond count (`"1722470400000000000"`) or an
/// RFC 3339 instant (`"2024-08-01T00:00:00Z"`).
pub fn parse_timestamp(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTimestamp("empty timestamp".to_string()));
    }

    if let Ok(nanos) = trimmed.parse::<i64>() {
        return Ok(nanos);
    }

    let parsed: DateTime<Utc> = trimmed
        .parse()
        .map_err(|_| Error::InvalidTimestamp(trimmed.to_string()))?;
    parsed
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::InvalidTimestamp(format!("out of range: {trimmed}")))
}

/// Parses a duration literal to nanoseconds.
///
/// Accepts `HH:MM:SS` (with optional fractional seconds), a suffixed form
/// (`"90s"`, `"15m"`, `"2h"`, `"1d"`), or a plain integer nanosecond count.
pub fn parse_duration(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTimestamp("empty duration".to_string()));
    }

    if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 3 {
            return Err(Error::InvalidTimestamp(trimmed.to_string()));
        }
        let hours: i64 = parts[0]
            .parse()
            .map_err(|_| Error::InvalidTimestamp(trimmed.to_string()))?;
        let minutes: i64 = parts[1]
            .parse()
            .map_err(|_| Error::InvalidTimestamp(trimmed.to_string()))?;
        let seconds: f64 = parts[2]
            .parse()
            .map_err(|_| Error::InvalidTimestamp(trimmed.to_string()))?;
        if !(0..60).contains(&minutes) || !(0.0..60.0).contains(&seconds) || hours < 0 {
            return Err(Error::InvalidTimestamp(trimmed.to_string()));
        }
        let nanos = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60))
            .and_then(|s| s.checked_mul(1_000_000_000))
            .and_then(|n| n.checked_add((seconds * 1_000_000_000.0).round() as i64))
            .ok_or_else(|| Error::InvalidTimestamp(trimmed.to_string()))?;
        return Ok(nanos);
    }

    if let Some(stripped) = trimmed.strip_suffix("ms") {
        return parse_duration_component(stripped, 1_000_000, trimmed);
    }
    if let Some(stripped) = trimmed.strip_suffix('s') {
        return parse_duration_component(stripped, 1_000_000_000, trimmed);
    }
    if let Some(stripped) = trimmed.strip_suffix('m') {
        return parse_duration_component(stripped, 60 * 1_000_000_000, trimmed);
    }
    if let Some(stripped) = trimmed.strip_suffix('h') {
        return parse_duration_component(stripped, 3600 * 1_000_000_000, trimmed);
    }
    if let Some(stripped) = trimmed.strip_suffix('d') {
        return parse_duration_component(stripped, 86400 * 1_000_000_000, trimmed);
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| Error::InvalidTimestamp(trimmed.to_string()))
}

fn parse_duration_component(value: &str, scale: i64, original: &str) -> Result<i64> {
    let magnitude: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTimestamp(original.to_string()))?;
    if magnitude < 0.0 {
        return Err(Error::InvalidTimestamp(original.to_string()));
    }
    Ok((magnitude * scale as f64).round() as i64)
}
