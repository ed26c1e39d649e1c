//! Report commands: `att today`, `att day` and `att range`.
//!
//! Each one fetches the devices and events for its dates, resolves the
//! device scope, builds the report, runs the view pipeline and then either
//! prints one page (table or JSON) or exports every matching row.

use std::fmt::Write as _;
use std::io::Write;
use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use att_client::ClockEventSource;
use att_core::{
    DeviceId, Report, ReportPage, ReportRequest, Scope, SortDirection, SortState, Timestamp,
    ViewState, build_export, elapsed_since, format_clock_time,
};
use chrono::Local;

use crate::ViewArgs;
use crate::commands::{export, util};

/// How a report run is scoped and rendered, independent of the source.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub company_id: String,
    /// Device the operator is restricted to, from config.
    pub assigned_device: Option<String>,
    /// Rows per page when `--page-size` is not given.
    pub page_size: NonZeroUsize,
    /// List elapsed time for open shifts (today only).
    pub live: bool,
}

/// Fetches what the request needs and builds the report.
///
/// Devices are fetched first so an unknown selection can be reported.
pub async fn build_report<S: ClockEventSource>(
    source: &S,
    company_id: &str,
    request: ReportRequest,
    assigned: Option<DeviceId>,
    requested: Option<DeviceId>,
) -> Result<(Report, Scope)> {
    let devices = source
        .fetch_devices(company_id)
        .await
        .context("failed to fetch devices")?;
    let scope = Scope::resolve(assigned, requested, &devices);

    let events = match request {
        ReportRequest::Today { date } | ReportRequest::Day { date } => {
            source.fetch_events_for_date(company_id, date).await
        }
        ReportRequest::Range { range } => source.fetch_events_for_range(company_id, range).await,
    }
    .context("failed to fetch attendance events")?;
    tracing::debug!(events = events.len(), ?scope, "fetched attendance events");

    Ok((Report::build(request, &events, &scope), scope))
}

/// Translates the view flags into pipeline state.
pub fn view_state(
    request: &ReportRequest,
    view: &ViewArgs,
    scope: &Scope,
    page_size: NonZeroUsize,
) -> ViewState {
    let mut state = ViewState::new(view.page_size.unwrap_or(page_size));
    state.set_mode(request.mode());
    state.set_device(scope.device().cloned());
    state.set_search(view.search.trim());
    if let Some(column) = view.sort {
        let direction = if view.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        state.set_sort(Some(SortState { column, direction }));
    }
    // Last: the setters above return to page 1.
    state.go_to_page(view.page);
    state
}

fn device_label(scope: &Scope) -> String {
    match scope {
        Scope::Assigned { device } => format!("{device} (assigned)"),
        Scope::Unrestricted {
            selected: Some(device),
        } => device.to_string(),
        Scope::Unrestricted { selected: None } => "All devices".to_string(),
    }
}

/// Formats one page as a titled table with a pager line.
pub fn format_page(page: &ReportPage, scope: &Scope, malformed: usize) -> String {
    let table = build_export(&page.report);
    let mut output = String::new();

    let _ = writeln!(output, "{}", table.title);
    let _ = writeln!(output, "Device: {}", device_label(scope));
    let _ = writeln!(output);

    if page.is_empty_result() {
        let _ = writeln!(output, "No records found.");
    } else {
        if table.rows.is_empty() {
            let _ = writeln!(output, "No records on this page.");
        } else {
            output.push_str(&util::render_table(&table.columns, &table.rows));
        }
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "Page {} of {} ({})",
            page.page,
            page.total_pages,
            util::plural(page.total_rows, "record")
        );
    }

    if malformed > 0 {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "Warning: {} with a check-out before check-in; no time counted for {}.",
            util::plural(malformed, "event"),
            if malformed == 1 { "it" } else { "them" }
        );
    }
    output
}

/// Lists open shifts on the page with how long each has been running.
///
/// Returns `None` for reports without open shifts.
pub fn format_live(report: &Report, as_of: Timestamp) -> Option<String> {
    let Report::Today { rows, .. } = report else {
        return None;
    };
    let open: Vec<Vec<String>> = rows
        .iter()
        .filter(|r| r.is_open_shift)
        .filter_map(|r| {
            let elapsed = elapsed_since(r.check_in, as_of)?;
            Some(vec![r.pin.to_string(), r.name.clone(), elapsed])
        })
        .collect();
    if open.is_empty() {
        return None;
    }

    let mut output = format!("On shift as of {}:\n", format_clock_time(as_of));
    output.push_str(&util::render_table(&["Employee ID", "Name", "Elapsed"], &open));
    Some(output)
}

/// Runs a report command against `source`, writing to `writer`.
pub fn run<S: ClockEventSource, W: Write>(
    writer: &mut W,
    source: &S,
    request: ReportRequest,
    view: &ViewArgs,
    options: &ReportOptions,
) -> Result<()> {
    let assigned = options
        .assigned_device
        .as_deref()
        .map(DeviceId::new)
        .transpose()
        .context("invalid assigned_device in config")?;
    let requested = view
        .device
        .as_deref()
        .map(DeviceId::new)
        .transpose()
        .context("invalid --device")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let (report, scope) = runtime.block_on(build_report(
        source,
        &options.company_id,
        request,
        assigned,
        requested,
    ))?;

    let state = view_state(&request, view, &scope, options.page_size);

    if let (Some(format), Some(path)) = (view.export, view.output.as_deref()) {
        let table = build_export(&report.arranged(&state));
        export::write_table(&table, format, path)?;
        writeln!(
            writer,
            "Exported {} to {}",
            util::plural(table.rows.len(), "row"),
            path.display()
        )?;
        return Ok(());
    }

    let page = report.page(&state);
    if view.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&page)?)?;
        return Ok(());
    }

    write!(writer, "{}", format_page(&page, &scope, report.malformed_count()))?;
    if options.live {
        if let Some(live) = format_live(&page.report, Local::now().fixed_offset()) {
            writeln!(writer)?;
            write!(writer, "{live}")?;
        }
    }
    Ok(())
}
