//! Wall-clock and elapsed-time formatting.
//!
//! All durations are rendered as `H:MM`: whole hours without padding, then
//! the remaining minutes padded to two digits. Seconds are truncated.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Display value for a missing checkout or an uncomputable duration.
pub const PLACEHOLDER: &str = "--";

/// Errors for timestamp pairs that cannot describe a shift.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The checkout happened before the check-in.
    #[error("check-out {check_out} precedes check-in {check_in}")]
    CheckOutBeforeCheckIn {
        check_in: DateTime<FixedOffset>,
        check_out: DateTime<FixedOffset>,
    },
}

/// Renders a timestamp as 12-hour clock time, e.g. `9:05 AM`.
pub fn format_clock_time(ts: DateTime<FixedOffset>) -> String {
    ts.format("%-I:%M %p").to_string()
}

/// Whole minutes between check-in and checkout, truncating seconds.
pub fn elapsed_minutes(
    check_in: DateTime<FixedOffset>,
    check_out: DateTime<FixedOffset>,
) -> Result<i64, TimeError> {
    if check_out < check_in {
        return Err(TimeError::CheckOutBeforeCheckIn {
            check_in,
            check_out,
        });
    }
    Ok((check_out - check_in).num_minutes())
}

/// Formats a minute count as `H:MM`. Negative input formats as `0:00`.
pub fn format_minutes(total_minutes: i64) -> String {
    let total = total_minutes.max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats the time worked between two timestamps as `H:MM`.
pub fn format_duration(
    check_in: DateTime<FixedOffset>,
    check_out: DateTime<FixedOffset>,
) -> Result<String, TimeError> {
    elapsed_minutes(check_in, check_out).map(format_minutes)
}

/// Live "time so far" for an open shift, measured against `as_of`.
///
/// This value is a display aid only. It depends on the caller's clock and is
/// never part of any report total. Returns `None` if `as_of` precedes the
/// check-in.
pub fn elapsed_since(
    check_in: DateTime<FixedOffset>,
    as_of: DateTime<FixedOffset>,
) -> Option<String> {
    format_duration(check_in, as_of).ok()
}
