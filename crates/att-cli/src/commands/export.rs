//! Writes an export table to disk.
//!
//! CSV files start with a one-cell title record, then the header, then one
//! record per row. JSON files hold the table object as-is.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use att_core::ExportTable;

use crate::ExportFormat;

/// Writes `table` to `path` in the requested format.
pub fn write_table(table: &ExportTable, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, path),
        ExportFormat::Json => write_json(table, path),
    }
    .with_context(|| format!("failed to write export to {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        "wrote export"
    );
    Ok(())
}

fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    // The title record has one field, so records differ in length.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record([table.title.as_str()])?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(table: &ExportTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExportTable {
        ExportTable {
            title: "Attendance Summary Report - 2025-03-01 to 2025-03-07".to_string(),
            columns: vec!["Name", "Employee ID", "Total Worked Hours (H:MM)"],
            rows: vec![
                vec!["Ada, Countess".to_string(), "1".to_string(), "16:15".to_string()],
                vec!["Grace".to_string(), "2".to_string(), "0:00".to_string()],
            ],
        }
    }

    #[test]
    fn test_csv_has_title_then_header_then_rows() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("summary.csv");

        write_table(&table(), ExportFormat::Csv, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            [
                "Attendance Summary Report - 2025-03-01 to 2025-03-07",
                "Name,Employee ID,Total Worked Hours (H:MM)",
                "\"Ada, Countess\",1,16:15",
                "Grace,2,0:00",
            ]
        );
    }

    #[test]
    fn test_json_round_trips_table_fields() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("summary.json");

        write_table(&table(), ExportFormat::Json, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title"], table().title);
        assert_eq!(value["columns"][2], "Total Worked Hours (H:MM)");
        assert_eq!(value["rows"][1][0], "Grace");
    }

    #[test]
    fn test_unwritable_path_reports_location() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing").join("out.csv");

        let err = write_table(&table(), ExportFormat::Csv, &path).unwrap_err();
        assert!(err.to_string().contains("failed to write export"));
    }
}
