//! Implementation of the `att devices` command.

use std::io::Write;

use anyhow::{Context, Result};
use att_client::ClockEventSource;
use att_core::Device;

use crate::commands::util;

/// Formats the device roster as a table.
pub fn format_devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices found.\n".to_string();
    }
    let rows: Vec<Vec<&str>> = devices
        .iter()
        .map(|d| vec![d.device_id.as_str(), d.device_name.as_str()])
        .collect();
    util::render_table(&["Device ID", "Name"], &rows)
}

/// Runs the devices command.
pub fn run<S: ClockEventSource, W: Write>(
    writer: &mut W,
    source: &S,
    company_id: &str,
    json: bool,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let devices = runtime
        .block_on(source.fetch_devices(company_id))
        .context("failed to fetch devices")?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&devices)?)?;
    } else {
        write!(writer, "{}", format_devices(&devices))?;
    }
    Ok(())
}
