//! Timestamp formatting at the storage boundary.
//!
//! Timestamps are persisted as fixed-format UTC strings (`YYYY-MM-DD HH:MM:SS`)
//! so they stay portable across storage backends and sort lexically in the same
//! order as chronologically. Everything above the repositories works with
//! `DateTime<Utc>`; these helpers are the only place the string format appears.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use crate::error::{internal::InternalError, AppError};

/// Storage representation of an instant.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats an instant for storage.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(STORAGE_FORMAT).to_string()
}

/// Parses a stored timestamp back into an instant.
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Parsed instant
/// - `Err(AppError::InternalErr(ParseTimestamp))` - The stored value does not
///   match the storage format (corrupt row)
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AppError> {
    let naive = NaiveDateTime::parse_from_str(value, STORAGE_FORMAT).map_err(|source| {
        InternalError::ParseTimestamp {
            value: value.to_string(),
            source,
        }
    })?;

    Ok(naive.and_utc())
}

/// Truncates an instant to the whole-second precision the storage format keeps.
///
/// Expiry comparisons must use the same precision as stored values, otherwise a
/// sub-second remainder would make an equal-length punishment look longer.
pub fn to_storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_nanosecond(0).unwrap_or(instant)
}
