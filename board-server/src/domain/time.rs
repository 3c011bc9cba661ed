//! Board time handling.
//!
//! The transit API sends RFC 3339 timestamps carrying the agency's UTC
//! offset (e.g. `2024-01-05T09:05:00-05:00`). The board shows times on a
//! 12-hour clock in that same offset, so values stay as
//! `DateTime<FixedOffset>` rather than being converted to local time.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

/// 12-hour clock without a leading zero on the hour, e.g. "9:05 AM".
const CLOCK_FORMAT: &str = "%-I:%M %p";

/// Month-day-year without leading zeros, e.g. "1-5-2024".
const DATE_FORMAT: &str = "%-m-%-d-%Y";

/// Full weekday name, e.g. "Friday".
const DAY_FORMAT: &str = "%A";

/// Error returned when an upstream timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimestampError {
    input: String,
    reason: String,
}

/// Parse an RFC 3339 timestamp, keeping its embedded offset.
///
/// # Examples
///
/// ```
/// use board_server::domain::parse_timestamp;
///
/// let t = parse_timestamp("2024-01-05T09:05:00-05:00").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), -5 * 3600);
///
/// assert!(parse_timestamp("09:05").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc3339(s).map_err(|e| TimestampError {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// Format an instant as a board clock string, e.g. "9:05 AM".
pub fn format_clock<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.format(CLOCK_FORMAT).to_string()
}

/// The "current time" header shown above the board.
///
/// All three fields come from one authoritative instant, which the
/// pipeline takes from the feed itself rather than the server clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeContext {
    /// Weekday name, e.g. "Friday".
    pub day: String,
    /// Date as month-day-year, e.g. "1-5-2024".
    pub date: String,
    /// Clock time, e.g. "9:05 AM".
    pub hour: String,
}

impl TimeContext {
    /// Build the header fields from an instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use board_server::domain::{TimeContext, parse_timestamp};
    ///
    /// let now = parse_timestamp("2024-01-05T09:05:00-05:00").unwrap();
    /// let ctx = TimeContext::from_instant(&now);
    /// assert_eq!(ctx.day, "Friday");
    /// assert_eq!(ctx.date, "1-5-2024");
    /// assert_eq!(ctx.hour, "9:05 AM");
    /// ```
    pub fn from_instant<Tz>(instant: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            day: instant.format(DAY_FORMAT).to_string(),
            date: instant.format(DATE_FORMAT).to_string(),
            hour: format_clock(instant),
        }
    }
}
