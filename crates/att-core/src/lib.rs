//! Attendance aggregation engine.
//!
//! Turns raw clock-in/clock-out records into operator-facing reports:
//! - Today: live roster, open shifts included
//! - Day: finalized timesheet for one date with time worked per shift
//! - Range: total worked time per employee across a date range
//!
//! Every report then goes through the same search/sort/paginate pipeline
//! and can be flattened into a labeled export table. Nothing here performs
//! I/O; all functions are pure over the events they are given.

mod daily;
pub mod event;
pub mod export;
mod range;
pub mod report;
pub mod scope;
pub mod time_format;
pub mod types;
pub mod view;

pub use daily::{DisplayRow, build_day_report, build_today_view};
pub use event::{ClockEvent, Device, Timestamp};
pub use export::{ExportTable, build_export};
pub use range::{EmployeeTotal, build_range_report};
pub use report::{Report, ReportMode, ReportPage, ReportRequest};
pub use scope::{Scope, filter_by_scope};
pub use time_format::{
    PLACEHOLDER, TimeError, elapsed_since, format_clock_time, format_duration, format_minutes,
};
pub use types::{DateRange, DeviceId, EmployeePin, ValidationError};
pub use view::{
    Column, Page, SortDirection, SortState, ViewRow, ViewState, apply_view, paginate, search, sort,
};
