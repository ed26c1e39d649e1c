//! Single-day views: the live roster for today and the finalized day report.

use serde::Serialize;

use crate::event::{ClockEvent, Timestamp};
use crate::scope::{Scope, filter_by_scope};
use crate::time_format::{PLACEHOLDER, format_clock_time, format_minutes};
use crate::types::EmployeePin;

/// One row of a today/day report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub pin: EmployeePin,
    pub name: String,
    /// Raw check-in, kept so the row sorts chronologically.
    pub check_in: Timestamp,
    #[serde(skip)]
    pub check_out: Option<Timestamp>,
    pub check_in_display: String,
    pub check_out_display: String,
    pub duration_display: String,
    /// Minutes worked, when the row carries a computed duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_minutes: Option<i64>,
    pub is_open_shift: bool,
    /// Checkout precedes check-in in the source record.
    pub malformed: bool,
}

/// Builds the live roster for today.
///
/// Open shifts are included with a placeholder checkout. Durations are not
/// computed here. Input order is preserved.
pub fn build_today_view(events: &[ClockEvent], scope: &Scope) -> Vec<DisplayRow> {
    filter_by_scope(events, scope)
        .into_iter()
        .map(|event| display_row(event, false))
        .collect()
}

/// Builds the finalized report for one date, with time worked per event.
///
/// Open shifts and reversed timestamp pairs get a placeholder duration; the
/// latter are flagged and logged but never abort the report.
pub fn build_day_report(events: &[ClockEvent], scope: &Scope) -> Vec<DisplayRow> {
    filter_by_scope(events, scope)
        .into_iter()
        .map(|event| display_row(event, true))
        .collect()
}

fn display_row(event: &ClockEvent, with_duration: bool) -> DisplayRow {
    let (worked_minutes, malformed) = match event.worked_minutes() {
        Ok(minutes) => (minutes, false),
        Err(err) => {
            if with_duration {
                tracing::warn!(pin = %event.employee_pin, error = %err, "skipping duration of malformed event");
            }
            (None, true)
        }
    };

    let duration_display = match worked_minutes {
        Some(minutes) if with_duration => format_minutes(minutes),
        _ => PLACEHOLDER.to_string(),
    };

    DisplayRow {
        pin: event.employee_pin.clone(),
        name: event.employee_name.clone(),
        check_in: event.check_in,
        check_out: event.check_out,
        check_in_display: format_clock_time(event.check_in),
        check_out_display: event
            .check_out
            .map_or_else(|| PLACEHOLDER.to_string(), format_clock_time),
        duration_display,
        worked_minutes: worked_minutes.filter(|_| with_duration),
        is_open_shift: event.is_open(),
        malformed,
    }
}
