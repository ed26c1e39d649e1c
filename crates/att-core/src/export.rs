//! Tabular export of finished reports.
//!
//! The table is handed to an external writer (CSV, JSON, PDF). It carries
//! its own title so the written artifact makes sense on its own.

use serde::Serialize;

use crate::report::Report;

pub const COL_EMPLOYEE_ID: &str = "Employee ID";
pub const COL_NAME: &str = "Name";
pub const COL_CHECK_IN: &str = "Check-in Time";
pub const COL_CHECK_OUT: &str = "Check-out Time";
pub const COL_TIME_WORKED: &str = "Time Worked";
pub const COL_TOTAL_WORKED: &str = "Total Worked Hours (H:MM)";

/// Labeled columns plus row cells, ready for a writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Renders every row of `report` into the fixed column set for its mode.
///
/// Pass a searched/sorted report, not a single page.
pub fn build_export(report: &Report) -> ExportTable {
    match report {
        Report::Today { date, rows } => ExportTable {
            title: format!("Today's Attendance Report - {date}"),
            columns: vec![COL_EMPLOYEE_ID, COL_NAME, COL_CHECK_IN, COL_CHECK_OUT],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.pin.to_string(),
                        r.name.clone(),
                        r.check_in_display.clone(),
                        r.check_out_display.clone(),
                    ]
                })
                .collect(),
        },
        Report::Day { date, rows } => ExportTable {
            title: format!("Daily Attendance Report - {date}"),
            columns: vec![
                COL_EMPLOYEE_ID,
                COL_NAME,
                COL_CHECK_IN,
                COL_CHECK_OUT,
                COL_TIME_WORKED,
            ],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.pin.to_string(),
                        r.name.clone(),
                        r.check_in_display.clone(),
                        r.check_out_display.clone(),
                        r.duration_display.clone(),
                    ]
                })
                .collect(),
        },
        Report::Range { range, totals } => ExportTable {
            title: format!("Attendance Summary Report - {range}"),
            columns: vec![COL_NAME, COL_EMPLOYEE_ID, COL_TOTAL_WORKED],
            rows: totals
                .iter()
                .map(|t| vec![t.name.clone(), t.pin.to_string(), t.total_display.clone()])
                .collect(),
        },
    }
}
