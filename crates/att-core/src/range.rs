//! Per-employee totals over a date range.
//!
//! # Algorithm
//!
//! 1. Narrow events to the device scope (the same filter the day views use).
//! 2. Group by employee PIN.
//! 3. Add the floored minutes of every closed shift to the employee's total.
//!    Open shifts add nothing. Reversed pairs add nothing and are logged.
//! 4. Format each total once, after summing.
//!
//! Summation is over integers, so the result does not depend on event order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{ClockEvent, Timestamp};
use crate::scope::{Scope, filter_by_scope};
use crate::time_format::format_minutes;
use crate::types::EmployeePin;

/// Total time worked by one employee across a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeTotal {
    pub pin: EmployeePin,
    pub name: String,
    pub total_minutes: i64,
    pub total_display: String,
    /// Closed shifts that contributed to the total.
    pub closed_shifts: usize,
    /// Shifts without a checkout, excluded from the total.
    pub open_shifts: usize,
    /// Events whose checkout precedes check-in, excluded from the total.
    pub rejected_events: usize,
}

#[derive(Debug, Default)]
struct Accumulator<'a> {
    name_source: Option<(Timestamp, &'a str)>,
    total_minutes: i64,
    closed_shifts: usize,
    open_shifts: usize,
    rejected_events: usize,
}

impl<'a> Accumulator<'a> {
    fn add(&mut self, event: &'a ClockEvent) {
        // Latest check-in names the employee; ties break on the name itself.
        let candidate = (event.check_in, event.employee_name.as_str());
        if self.name_source.is_none_or(|current| candidate > current) {
            self.name_source = Some(candidate);
        }

        match event.worked_minutes() {
            Ok(Some(minutes)) => {
                self.total_minutes += minutes;
                self.closed_shifts += 1;
            }
            Ok(None) => self.open_shifts += 1,
            Err(err) => {
                tracing::warn!(pin = %event.employee_pin, error = %err, "excluding malformed event from range total");
                self.rejected_events += 1;
            }
        }
    }

    fn finish(self, pin: EmployeePin) -> EmployeeTotal {
        EmployeeTotal {
            pin,
            name: self
                .name_source
                .map(|(_, name)| name.to_string())
                .unwrap_or_default(),
            total_minutes: self.total_minutes,
            total_display: format_minutes(self.total_minutes),
            closed_shifts: self.closed_shifts,
            open_shifts: self.open_shifts,
            rejected_events: self.rejected_events,
        }
    }
}

/// Folds events into one total per employee, ordered by PIN.
pub fn build_range_report(events: &[ClockEvent], scope: &Scope) -> Vec<EmployeeTotal> {
    let mut groups: BTreeMap<&EmployeePin, Accumulator<'_>> = BTreeMap::new();

    for event in filter_by_scope(events, scope) {
        groups.entry(&event.employee_pin).or_default().add(event);
    }

    tracing::debug!(employees = groups.len(), "aggregated range totals");

    groups
        .into_iter()
        .map(|(pin, acc)| acc.finish(pin.clone()))
        .collect()
}
