//! Raw attendance records as supplied by an event source.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time_format::{TimeError, elapsed_minutes};
use crate::types::{DeviceId, EmployeePin};

/// An absolute instant that remembers the wall-clock offset it was recorded in.
///
/// Display formatting uses the carried offset as-is; no conversion to the
/// viewer's timezone ever happens.
pub type Timestamp = DateTime<FixedOffset>;

/// One check-in/check-out record for an employee on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    pub employee_pin: EmployeePin,
    pub employee_name: String,
    pub device_id: DeviceId,
    pub check_in: Timestamp,
    /// `None` while the shift is still open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<Timestamp>,
}

impl ClockEvent {
    /// Returns true if the employee has not checked out yet.
    pub const fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// The calendar date of the check-in, in the check-in's own offset.
    pub fn work_date(&self) -> NaiveDate {
        self.check_in.date_naive()
    }

    /// Whole minutes worked, `None` for an open shift.
    ///
    /// Fails when the checkout precedes the check-in.
    pub fn worked_minutes(&self) -> Result<Option<i64>, TimeError> {
        self.check_out
            .map(|out| elapsed_minutes(self.check_in, out))
            .transpose()
    }
}

/// A clock device registered to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: DeviceId,
    pub device_name: String,
}
