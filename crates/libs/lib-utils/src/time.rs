//! # Time Utilities
//!
//! Block-time formatting using chrono.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Display format for ledger block times.
pub const BLOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a ledger block time (seconds since the Unix epoch) in the local time zone.
///
/// Returns `None` if the timestamp is outside chrono's representable range.
pub fn format_block_time(unix_secs: i64) -> Option<String> {
    format_block_time_in(unix_secs, &Local)
}

/// Format a ledger block time in an explicit time zone.
pub fn format_block_time_in<Tz>(unix_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp(unix_secs, 0)
        .map(|utc| utc.with_timezone(tz).format(BLOCK_TIME_FORMAT).to_string())
}
