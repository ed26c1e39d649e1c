use std::io::stdout;

use anyhow::{Context, Result};
use att_core::{DateRange, ReportRequest};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use att_cli::commands::{devices, report};
use att_cli::{AnySource, Cli, Commands, Config, ViewArgs};

/// Loads config and picks the event source for this run.
fn open_source(cli: &Cli) -> Result<(AnySource, Config, String)> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let source = AnySource::from_config(&config, cli.events_file.as_deref())?;
    let company_id = source.company_id(cli.company.as_deref(), &config)?;
    Ok((source, config, company_id))
}

fn run_report(cli: &Cli, request: ReportRequest, view: &ViewArgs, live: bool) -> Result<()> {
    let (source, config, company_id) = open_source(cli)?;
    let options = report::ReportOptions {
        company_id,
        assigned_device: config.assigned_device,
        page_size: config.page_size,
        live,
    };
    report::run(&mut stdout().lock(), &source, request, view, &options)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Today { date, live, view }) => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            run_report(&cli, ReportRequest::Today { date }, view, *live)?;
        }
        Some(Commands::Day { date, view }) => {
            run_report(&cli, ReportRequest::Day { date: *date }, view, false)?;
        }
        Some(Commands::Range { start, end, view }) => {
            let range = DateRange::new(*start, *end).context("invalid date range")?;
            run_report(&cli, ReportRequest::Range { range }, view, false)?;
        }
        Some(Commands::Devices { json }) => {
            let (source, _config, company_id) = open_source(&cli)?;
            devices::run(&mut stdout().lock(), &source, &company_id, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
