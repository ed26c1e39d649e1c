//! Device scoping applied before any report is built.

use serde::{Deserialize, Serialize};

use crate::event::{ClockEvent, Device};
use crate::types::DeviceId;

/// Which devices an operator's report may draw events from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// The operator may pick any device. `None` means all devices.
    Unrestricted { selected: Option<DeviceId> },
    /// The operator only ever sees one assigned device.
    Assigned { device: DeviceId },
}

impl Default for Scope {
    fn default() -> Self {
        Self::Unrestricted { selected: None }
    }
}

impl Scope {
    /// Builds the scope for a request.
    ///
    /// An assigned device always wins over whatever the operator asked for.
    /// A requested device missing from the roster is kept: it matches no
    /// events and the report comes back empty.
    pub fn resolve(
        assigned: Option<DeviceId>,
        requested: Option<DeviceId>,
        devices: &[Device],
    ) -> Self {
        if let Some(device) = assigned {
            if requested.as_ref().is_some_and(|r| *r != device) {
                tracing::debug!(%device, "ignoring device selection for restricted operator");
            }
            return Self::Assigned { device };
        }

        if let Some(selected) = &requested {
            if !devices.iter().any(|d| d.device_id == *selected) {
                tracing::warn!(device = %selected, "selected device is not in the company roster");
            }
        }
        Self::Unrestricted {
            selected: requested,
        }
    }

    /// The single device this scope narrows to, if any.
    pub const fn device(&self) -> Option<&DeviceId> {
        match self {
            Self::Unrestricted { selected } => selected.as_ref(),
            Self::Assigned { device } => Some(device),
        }
    }

    /// Returns true if the event is visible under this scope.
    pub fn admits(&self, event: &ClockEvent) -> bool {
        self.device().is_none_or(|device| event.device_id == *device)
    }
}

/// Keeps the events visible under `scope`, preserving input order.
///
/// Every report builder goes through this one function.
pub fn filter_by_scope<'a>(events: &'a [ClockEvent], scope: &Scope) -> Vec<&'a ClockEvent> {
    let kept: Vec<&ClockEvent> = events.iter().filter(|e| scope.admits(e)).collect();
    tracing::debug!(
        total = events.len(),
        kept = kept.len(),
        "filtered events by device scope"
    );
    kept
}
