//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use kpimap_ingest::{DEFAULT_PREVIEW_ROWS, MIN_HEADER_ROW};

#[derive(Parser)]
#[command(
    name = "kpimap",
    version,
    about = "KPI Mapping Studio - map KPI required fields onto table columns",
    long_about = "Load tabular data files, declare relationships between them, and map\n\
                  each KPI's required fields onto table columns, then export plain-text\n\
                  summaries of the relationships and mappings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one data file and show its columns and a row sample.
    Preview(PreviewArgs),

    /// List the KPI definitions in a catalog file.
    Catalog(CatalogArgs),

    /// Replay a project file and write the relationship and mapping exports.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Path to the delimited data file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// 1-based row index of the header line (1-10).
    #[arg(long = "header-row", value_name = "N", default_value_t = MIN_HEADER_ROW)]
    pub header_row: usize,

    /// Maximum number of data rows to sample.
    #[arg(long = "rows", value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Path to the KPI catalog CSV.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the TOML project file describing the session.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Output directory for generated files (default: <PROJECT DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
