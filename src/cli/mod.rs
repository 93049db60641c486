//! Command-line parsing for the FRED series overlay tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the alignment/rendering code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::SeriesSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fo", version, about = "Overlay FRED economic series with recession shading")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch series, print a summary and an ASCII overlay plot.
    Show(ShowArgs),
    /// Write the merged (and clipped) series to CSV or JSON.
    Export(ExportArgs),
    /// List preset series and the recession catalog.
    List,
    /// Launch the interactive TUI.
    Tui(ChartArgs),
}

/// Options shared by every command that builds a chart.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Series to overlay, up to three: `ID` or `ID:annualized` (repeatable).
    #[arg(short = 's', long = "series", value_name = "SPEC")]
    pub series: Vec<SeriesSpec>,

    /// First date to display (YYYY-MM-DD, inclusive).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last date to display (YYYY-MM-DD, inclusive).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Plot the second series against its own right-hand y-axis.
    #[arg(long)]
    pub dual_axis: bool,

    /// Earliest observation requested from FRED (defaults to $FRED_OBSERVATION_START or 1950-01-01).
    #[arg(long, value_name = "DATE")]
    pub observation_start: Option<NaiveDate>,
}

/// Options for `fo show`.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Skip the ASCII plot and print only the summary.
    #[arg(long)]
    pub no_plot: bool,
}

/// Options for `fo export`.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Output file.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: PathBuf,

    /// Output format (inferred from the file extension when omitted).
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
