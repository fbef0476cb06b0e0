//! ISO 8601 parsing for values arriving at the HTTP boundary.
//!
//! Naive date-times (no offset) are interpreted as UTC, and a bare calendar
//! date is interpreted as midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::error::{CoreError, CoreResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// ## Summary
/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`) supplied for `field`.
///
/// ## Errors
/// Returns `InvalidInput` if the value is not a valid calendar date.
pub fn parse_iso_date(field: &'static str, raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| CoreError::InvalidInput {
        field,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

/// ## Summary
/// Parses an ISO 8601 date or date-time into a UTC timestamp.
///
/// Accepts RFC 3339 values with an offset, naive date-times (taken as UTC)
/// and bare dates (taken as midnight UTC).
///
/// ## Errors
/// Returns `InvalidInput` if none of the accepted shapes match.
pub fn parse_iso_datetime(field: &'static str, raw: &str) -> CoreResult<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(CoreError::InvalidInput {
        field,
        value: raw.to_string(),
        reason: "expected ISO 8601".to_string(),
    })
}

/// ## Summary
/// Validates a 24-hour `HH:MM` time-of-day string.
///
/// ## Errors
/// Returns `ValidationError` if the value is not exactly `HH:MM` within
/// `00:00`..=`23:59`.
pub fn validate_time_of_day(raw: &str) -> CoreResult<()> {
    let well_formed = raw.len() == 5
        && raw.as_bytes()[2] == b':'
        && NaiveTime::parse_from_str(raw, "%H:%M").is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(CoreError::ValidationError {
            field: "time_of_day",
            value: raw.to_string(),
            expected: "must be HH:MM (24h)",
        })
    }
}

/// Inclusive timestamp range used by listings and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// ## Summary
    /// Resolves optional raw `start`/`end` values against `now`.
    ///
    /// A missing `start` defaults to `now - lookback_days`, a missing `end`
    /// to `now`.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if a provided bound cannot be parsed.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        now: DateTime<Utc>,
        lookback_days: i64,
    ) -> CoreResult<Self> {
        let start = match start {
            Some(raw) => parse_iso_datetime("start", raw)?,
            None => now - TimeDelta::days(lookback_days),
        };
        let end = match end {
            Some(raw) => parse_iso_datetime("end", raw)?,
            None => now,
        };
        Ok(Self { start, end })
    }
}
