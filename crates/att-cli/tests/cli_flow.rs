//! End-to-end tests driving the `att` binary against a snapshot file.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn att_binary() -> String {
    env!("CARGO_BIN_EXE_att").to_string()
}

const SNAPSHOT: &str = r#"{
  "devices": [
    {"deviceId": "lobby", "deviceName": "Lobby"},
    {"deviceId": "dock", "deviceName": "Dock"}
  ],
  "events": [
    {"employeePin": "1", "employeeName": "Ada", "deviceId": "lobby",
     "checkInTime": "2025-03-03T09:00:00Z", "checkOutTime": "2025-03-03T17:30:00Z"},
    {"employeePin": "1", "employeeName": "Ada", "deviceId": "lobby",
     "checkInTime": "2025-03-04T09:15:00Z", "checkOutTime": "2025-03-04T17:00:00Z"},
    {"employeePin": "2", "employeeName": "Grace", "deviceId": "dock",
     "checkInTime": "2025-03-04T08:00:00Z", "checkOutTime": null},
    {"employeePin": "3", "employeeName": "Linus", "deviceId": "dock",
     "checkInTime": "2025-03-04 10:00:00", "checkOutTime": "2025-03-04 12:30:00"}
  ]
}"#;

/// Writes the snapshot into an isolated HOME.
fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("events.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    (temp, path)
}

fn att(home: &Path, events: &Path, args: &[&str]) -> Output {
    Command::new(att_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("ATT_BASE_URL")
        .env_remove("ATT_COMPANY_ID")
        .env_remove("ATT_ASSIGNED_DEVICE")
        .env_remove("ATT_PAGE_SIZE")
        .arg("--events-file")
        .arg(events)
        .args(args)
        .output()
        .expect("failed to run att")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "att should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_day_report_lists_each_event() {
    let (temp, events) = setup();
    let out = stdout_of(&att(temp.path(), &events, &["day", "--date", "2025-03-04"]));

    assert!(out.starts_with("Daily Attendance Report - 2025-03-04\n"));
    assert!(out.contains("Ada"));
    assert!(out.contains("7:45"));
    assert!(out.contains("2:30"));
    assert!(out.contains("Page 1 of 1 (3 records)"));
}

#[test]
fn test_range_totals_by_employee() {
    let (temp, events) = setup();
    let out = stdout_of(&att(
        temp.path(),
        &events,
        &["range", "--start", "2025-03-01", "--end", "2025-03-07", "--json"],
    ));

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let totals = value["report"]["totals"].as_array().unwrap();
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0]["name"], "Ada");
    assert_eq!(totals[0]["total_display"], "16:15");
    assert_eq!(totals[1]["total_display"], "0:00");
    assert_eq!(totals[2]["total_display"], "2:30");
}

#[test]
fn test_device_filter_and_search() {
    let (temp, events) = setup();
    let out = stdout_of(&att(
        temp.path(),
        &events,
        &["day", "--date", "2025-03-04", "--device", "dock", "--search", "LIN"],
    ));

    assert!(out.contains("Device: dock"));
    assert!(out.contains("Linus"));
    assert!(!out.contains("Grace"));
    assert!(out.contains("(1 record)"));
}

#[test]
fn test_csv_export_writes_all_rows() {
    let (temp, events) = setup();
    let csv_path = temp.path().join("summary.csv");
    let out = stdout_of(&att(
        temp.path(),
        &events,
        &[
            "range",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-07",
            "--page-size",
            "1",
            "--export",
            "csv",
            "--output",
            csv_path.to_str().unwrap(),
        ],
    ));
    assert!(out.starts_with("Exported 3 rows"));

    let written = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Attendance Summary Report - 2025-03-01 to 2025-03-07");
    assert_eq!(lines[1], "Name,Employee ID,Total Worked Hours (H:MM)");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_devices_json() {
    let (temp, events) = setup();
    let out = stdout_of(&att(temp.path(), &events, &["devices", "--json"]));

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["device_id"], "lobby");
}

#[test]
fn test_inverted_range_is_rejected() {
    let (temp, events) = setup();
    let output = att(
        temp.path(),
        &events,
        &["range", "--start", "2025-03-07", "--end", "2025-03-01"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date range"), "stderr: {stderr}");
}

#[test]
fn test_missing_source_is_reported() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(att_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env_remove("ATT_BASE_URL")
        .args(["day", "--date", "2025-03-04"])
        .output()
        .expect("failed to run att");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no event source configured"), "stderr: {stderr}");
}
