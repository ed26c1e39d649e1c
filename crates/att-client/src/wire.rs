//! Records as they arrive from a backend or an export file.
//!
//! Timestamps stay strings here; converting a record validates it and
//! yields a core [`ClockEvent`].

use att_core::{ClockEvent, Device, DeviceId, EmployeePin, Timestamp};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::SourceError;

/// Naive layouts accepted when a timestamp has no offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// An attendance record on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(alias = "employee_pin")]
    pub employee_pin: String,
    #[serde(alias = "employee_name", default)]
    pub employee_name: String,
    #[serde(alias = "device_id")]
    pub device_id: String,
    #[serde(alias = "check_in_time", alias = "check_in")]
    pub check_in_time: String,
    #[serde(alias = "check_out_time", alias = "check_out", default)]
    pub check_out_time: Option<String>,
}

/// A device on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(alias = "device_id")]
    pub device_id: String,
    #[serde(alias = "device_name", default)]
    pub device_name: String,
}

/// A list that may or may not be wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Parses an RFC 3339 timestamp, or a naive one read as wall-clock time at
/// offset zero.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| format!("unrecognized timestamp {value:?}"))
}

impl EventRecord {
    /// Validates the record. `index` only feeds the error message.
    pub fn into_event(self, index: usize) -> Result<ClockEvent, SourceError> {
        let invalid = |reason: String| SourceError::InvalidRecord { index, reason };

        let employee_pin = EmployeePin::new(self.employee_pin).map_err(|e| invalid(e.to_string()))?;
        let device_id = DeviceId::new(self.device_id).map_err(|e| invalid(e.to_string()))?;
        let check_in = parse_timestamp(&self.check_in_time).map_err(invalid)?;
        let check_out = match self.check_out_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw).map_err(invalid)?),
        };

        Ok(ClockEvent {
            employee_pin,
            employee_name: self.employee_name,
            device_id,
            check_in,
            check_out,
        })
    }
}

impl DeviceRecord {
    pub fn into_device(self, index: usize) -> Result<Device, SourceError> {
        let device_id = DeviceId::new(self.device_id).map_err(|e| SourceError::InvalidRecord {
            index,
            reason: e.to_string(),
        })?;
        Ok(Device {
            device_id,
            device_name: self.device_name,
        })
    }
}

/// Converts all records, failing on the first invalid one.
pub fn events_from_records(records: Vec<EventRecord>) -> Result<Vec<ClockEvent>, SourceError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_event(index))
        .collect()
}

pub fn devices_from_records(records: Vec<DeviceRecord>) -> Result<Vec<Device>, SourceError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_device(index))
        .collect()
}
