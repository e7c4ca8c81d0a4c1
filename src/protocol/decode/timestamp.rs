//! Temporal normalization.
//!
//! The store keeps every instant as milliseconds since the Unix epoch. Dates
//! and times bound through the protocol are folded into that one
//! representation, so every temporal value compares equal after a round trip
//! no matter which setter produced it.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Truncate an instant to the store's millisecond precision.
pub fn normalize_timestamp(ts: DateTime<Utc>) -> DateTime<Utc> {
    let millis = ts.timestamp_millis();
    // Truncation can only move the instant backwards within the same second.
    Utc.timestamp_millis_opt(millis).single().unwrap_or(ts)
}

/// Midnight UTC at the start of `date`.
pub fn date_to_timestamp(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Time of day anchored on the epoch date, millisecond precision.
pub fn time_to_timestamp(time: NaiveTime) -> DateTime<Utc> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    normalize_timestamp(Utc.from_utc_datetime(&epoch.and_time(time)))
}

/// Decode milliseconds since the Unix epoch.
///
/// # Errors
/// Returns `Error::TypeConversion` when the value is outside chrono's range.
pub fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| Error::type_conversion(format!("Timestamp out of range: {} ms", millis)))
}
