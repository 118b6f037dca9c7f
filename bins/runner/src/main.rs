//! Tally report runner.
//!
//! Usage:
//!   tally <report-id> [--pretty]  - Run one report and print the workbook as JSON
//!   tally list                    - List the configured report definitions
//!
//! Configuration is read from `config/default.toml`, `config/{RUN_MODE}.toml`
//! and `TALLY__*` environment variables.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::reports::{ReportConfigSource, ReportContext, ReportEngine, ReportError};
use tally_render::{JsonSink, RenderError, RenderSink, render};
use tally_shared::{AppConfig, AppError};
use tally_store::{FileReportDefinitions, InMemoryLedger};

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run { report_id: String, pretty: bool },
    List,
}

impl Command {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, AppError> {
        let mut report_id = None;
        let mut pretty = false;
        for arg in args {
            match arg.as_str() {
                "--pretty" => pretty = true,
                flag if flag.starts_with('-') => {
                    return Err(AppError::Validation(format!("Unknown option: {flag}")));
                }
                _ if report_id.is_some() => {
                    return Err(AppError::Validation(format!("Unexpected argument: {arg}")));
                }
                _ => report_id = Some(arg),
            }
        }
        match report_id {
            Some(id) if id == "list" => Ok(Self::List),
            Some(report_id) => Ok(Self::Run { report_id, pretty }),
            None => Err(AppError::Validation(
                "Usage: tally <report-id> [--pretty] | tally list".to_string(),
            )),
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the workbook
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Report run failed");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let command = Command::parse(std::env::args().skip(1))?;
    let config = AppConfig::load().map_err(AppError::from)?;
    let definitions = FileReportDefinitions::load(&config.reports.definitions_path)
        .with_context(|| format!("loading {}", config.reports.definitions_path))?;

    let (report_id, pretty) = match command {
        Command::List => {
            let mut stdout = io::stdout().lock();
            for id in definitions.definition_ids() {
                writeln!(stdout, "{id}")?;
            }
            return Ok(());
        }
        Command::Run { report_id, pretty } => (report_id, pretty),
    };

    let ledger = InMemoryLedger::load(&config.ledger.snapshot_path)
        .with_context(|| format!("loading {}", config.ledger.snapshot_path))?;
    info!(
        company = %config.company.name,
        lines = ledger.line_count(),
        "Ledger loaded"
    );

    let today = chrono::Local::now().date_naive();
    let context = ReportContext::from_config(&config, today);
    let output = ReportEngine::new(&ledger, &context).run_by_id(&definitions, &report_id)?;
    let workbook = render(&output);

    let stdout = io::stdout().lock();
    if pretty {
        JsonSink::pretty(stdout).write(&workbook)?;
    } else {
        JsonSink::new(stdout).write(&workbook)?;
    }
    Ok(())
}

/// Maps the failure to the process exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(app) = err.downcast_ref::<AppError>() {
        app.exit_code()
    } else if let Some(report) = err.downcast_ref::<ReportError>() {
        if report.is_configuration_error() { 2 } else { 1 }
    } else if err.downcast_ref::<RenderError>().is_some() {
        4
    } else {
        1
    }
}
