//! JSON snapshot files as an event source.
//!
//! A snapshot holds one company's devices and events:
//!
//! ```json
//! { "devices": [{ "deviceId": "lobby", "deviceName": "Lobby" }],
//!   "events":  [{ "employeePin": "7", "employeeName": "Ada",
//!                 "deviceId": "lobby", "checkInTime": "2025-03-05T09:00:00Z",
//!                 "checkOutTime": null }] }
//! ```
//!
//! The company ID is ignored: a file only ever describes one company.

use std::path::{Path, PathBuf};

use att_core::{ClockEvent, DateRange, Device};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::wire::{DeviceRecord, EventRecord, devices_from_records, events_from_records};
use crate::{ClockEventSource, SourceError};

/// Raw file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// Reads events from a snapshot file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Snapshot, SourceError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| SourceError::Io {
                    path: self.path.clone(),
                    source,
                })?;
        serde_json::from_str(&contents).map_err(|err| {
            SourceError::InvalidResponse(format!("{}: {err}", self.path.display()))
        })
    }

    async fn events_within(&self, range: DateRange) -> Result<Vec<ClockEvent>, SourceError> {
        let snapshot = self.load().await?;
        let events = events_from_records(snapshot.events)?;
        let total = events.len();
        let kept: Vec<ClockEvent> = events
            .into_iter()
            .filter(|e| range.contains(e.work_date()))
            .collect();
        tracing::debug!(path = ?self.path, total, kept = kept.len(), "loaded events from snapshot");
        Ok(kept)
    }
}

impl ClockEventSource for FileSource {
    async fn fetch_events_for_date(
        &self,
        _company_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        self.events_within(DateRange::single(date)).await
    }

    async fn fetch_events_for_range(
        &self,
        _company_id: &str,
        range: DateRange,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        self.events_within(range).await
    }

    async fn fetch_devices(&self, _company_id: &str) -> Result<Vec<Device>, SourceError> {
        let snapshot = self.load().await?;
        devices_from_records(snapshot.devices)
    }
}
