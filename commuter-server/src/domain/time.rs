//! Departure timestamp handling.
//!
//! The predictions feed sends ISO-8601 timestamps with an explicit UTC offset
//! (e.g. "2024-01-01T08:00:00-05:00"). We keep the offset as sent so the
//! departure can be displayed in the station's local time, while comparisons
//! against the clock happen on the absolute instant.

use chrono::{DateTime, FixedOffset};

/// Error returned when a departure timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time {raw:?}: {reason}")]
pub struct TimeError {
    raw: String,
    reason: String,
}

/// Parse an upstream departure timestamp.
///
/// # Examples
///
/// ```
/// use commuter_server::domain::parse_departure_time;
///
/// let t = parse_departure_time("2024-01-01T08:00:00-05:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-01-01T08:00:00-05:00");
///
/// assert!(parse_departure_time("08:00").is_err());
/// ```
pub fn parse_departure_time(raw: &str) -> Result<DateTime<FixedOffset>, TimeError> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| TimeError {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}
