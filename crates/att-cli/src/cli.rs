//! Command-line argument definitions.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use att_core::Column;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Attendance reports from clock-in/clock-out records.
///
/// Builds today's roster, single-day timesheets and per-employee range
/// totals, with search, sorting, paging and export.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read events from a JSON snapshot instead of the backend.
    #[arg(long, global = true, value_name = "PATH")]
    pub events_file: Option<PathBuf>,

    /// Company to report on (overrides config).
    #[arg(long, global = true)]
    pub company: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Live roster for today, open shifts included.
    Today {
        /// Date to treat as today (defaults to the local date).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// List how long each open shift has been running.
        #[arg(long)]
        live: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Finalized timesheet for one date.
    Day {
        /// Report date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Total worked time per employee over a date range.
    Range {
        /// First date, inclusive (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Last date, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List the company's clock devices.
    Devices {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Search, sort, paging and output options shared by every report.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Only include events from this device.
    #[arg(long)]
    pub device: Option<String>,

    /// Case-insensitive match against employee name or PIN.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Column to sort by (pin, name, check-in, check-out, duration, total).
    #[arg(long)]
    pub sort: Option<Column>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides config).
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Output the page as JSON.
    #[arg(long, conflicts_with = "export")]
    pub json: bool,

    /// Write every matching row to a file instead of printing a page.
    #[arg(long, value_enum, requires = "output")]
    pub export: Option<ExportFormat>,

    /// Export destination.
    #[arg(long, requires = "export")]
    pub output: Option<PathBuf>,
}

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_range_with_view_flags() {
        let cli = Cli::try_parse_from([
            "att", "range", "--start", "2025-03-01", "--end", "2025-03-07", "--sort", "total",
            "--desc", "--page-size", "25",
        ])
        .unwrap();

        let Some(Commands::Range { start, end, view }) = cli.command else {
            panic!("expected range command");
        };
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(view.sort, Some(Column::Total));
        assert!(view.desc);
        assert_eq!(view.page_size, NonZeroUsize::new(25));
    }

    #[test]
    fn rejects_unknown_sort_column() {
        let result = Cli::try_parse_from(["att", "day", "--date", "2025-03-05", "--sort", "salary"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_page_size() {
        let result =
            Cli::try_parse_from(["att", "day", "--date", "2025-03-05", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn export_requires_output() {
        let result = Cli::try_parse_from(["att", "day", "--date", "2025-03-05", "--export", "csv"]);
        assert!(result.is_err());
    }
}
