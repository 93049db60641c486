//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - resolves configuration (CLI + environment)
//! - fetches and aligns FRED series
//! - prints reports/plots, writes exports, or hands off to the TUI

use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;

use crate::cli::{ChartArgs, Command, ExportArgs, ShowArgs};
use crate::data::{FredClient, NBER_RECESSIONS};
use crate::domain::{DEFAULT_OBSERVATION_START, DashboardConfig, DateWindow};
use crate::error::AppError;

pub mod pipeline;
pub mod worker;

const TUI_LOG_FILE: &str = "fo.log";

/// Entry point for the `fo` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fo` and `fo -s UNRATE` to behave like `fo tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => {
            crate::logging::init_stderr();
            handle_show(args)
        }
        Command::Export(args) => {
            crate::logging::init_stderr();
            handle_export(args)
        }
        Command::List => {
            println!("{}", crate::report::format_catalog());
            Ok(())
        }
        Command::Tui(args) => {
            crate::logging::init_file(Path::new(TUI_LOG_FILE))?;
            let config = config_from_args(&args)?;
            crate::tui::run(config)
        }
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let mut config = config_from_args(&args.chart)?;
    config.plot_width = args.width;
    config.plot_height = args.height;

    let client = FredClient::from_env()?;
    let run = pipeline::run(&client, &config)?;

    println!("{}", crate::report::format_summary(&run.visible, &run.window));

    if !args.no_plot && !run.visible.is_empty() {
        let plot = crate::plot::render_overlay_plot(
            &run.visible,
            NBER_RECESSIONS,
            config.plot_width,
            config.plot_height,
            config.dual_axis,
        );
        println!("{plot}");
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let mut config = config_from_args(&args.chart)?;
    config.export = Some(args.out.clone());

    let client = FredClient::from_env()?;
    let run = pipeline::run(&client, &config)?;

    let format = crate::io::resolve_format(&args.out, args.format);
    crate::io::write_bundle(&args.out, format, &run.visible)?;
    println!(
        "Wrote {} rows x {} series to {}",
        run.visible.dates.len(),
        run.visible.series.len(),
        args.out.display()
    );
    Ok(())
}

/// Build a `DashboardConfig` from CLI arguments and the environment.
pub fn config_from_args(args: &ChartArgs) -> Result<DashboardConfig, AppError> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            return Err(AppError::config(format!("--from {from} is after --to {to}.")));
        }
    }

    let observation_start = match args.observation_start {
        Some(date) => date,
        None => observation_start_from_env()?,
    };

    Ok(DashboardConfig {
        series: args.series.clone(),
        window: DateWindow::new(args.from.map(|d| d.to_string()), args.to.map(|d| d.to_string())),
        dual_axis: args.dual_axis,
        observation_start: observation_start.to_string(),
        ..DashboardConfig::default()
    })
}

fn observation_start_from_env() -> Result<NaiveDate, AppError> {
    dotenvy::dotenv().ok();
    let raw = std::env::var("FRED_OBSERVATION_START").unwrap_or_else(|_| DEFAULT_OBSERVATION_START.to_string());
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::config(format!("Invalid FRED_OBSERVATION_START '{raw}': {e}")))
}

/// Rewrite argv so `fo` defaults to `fo tui`.
///
/// Rules:
/// - `fo`                      -> `fo tui`
/// - `fo -s UNRATE ...`        -> `fo tui -s UNRATE ...`
/// - `fo --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "export" | "list" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
