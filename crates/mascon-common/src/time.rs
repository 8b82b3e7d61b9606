//! Time handling utilities for gridded gravimetry data.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Parse an ISO 8601 timestamp string.
///
/// Accepts, in order of preference:
/// - Full RFC 3339 with timezone: "2009-01-15T00:00:00Z"
/// - Naive datetime (assumed UTC): "2009-01-15T00:00:00"
/// - Bare date (midnight UTC): "2009-01-15"
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&format!("{}T00:00:00", s), "%Y-%m-%dT%H:%M:%S")
    {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// Fractional days elapsed from `epoch` to `t` (negative if `t` precedes it).
pub fn days_between(epoch: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
    const SECONDS_PER_DAY: f64 = 86_400.0;
    let delta = t.signed_duration_since(epoch);
    delta.num_milliseconds() as f64 / 1_000.0 / SECONDS_PER_DAY
}

/// An inclusive time range for trend queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}
