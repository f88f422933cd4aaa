//! CLI argument definitions for the recruitment ETL.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use recruit_model::IntegrityPolicy;

#[derive(Parser)]
#[command(
    name = "recruit-etl",
    version,
    about = "Recruitment warehouse ETL - CSV to SQLite star schema with KPI reports",
    long_about = "Load the candidate applications CSV into a SQLite star schema.\n\n\
                  Rows with missing values are dropped, the hiring rule marks candidates\n\
                  scoring at least 7 in both the code challenge and the technical interview,\n\
                  and the KPI dashboard is queried from the persisted tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file (defaults apply when omitted).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Extract, transform, and load the candidate CSV.
    Run(RunArgs),

    /// Show the KPI dashboard of an existing warehouse.
    Report(ReportArgs),

    /// Export every warehouse table to CSV.
    Export(ExportArgs),

    /// Print the DDL the load stage executes.
    Schema,
}

#[derive(Args)]
pub struct RunArgs {
    /// Candidate CSV file (overrides `paths.input`).
    #[arg(value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// SQLite database to create (overrides `paths.database`).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Field separator of the CSV (overrides `extract.separator`).
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,

    /// What to do with unresolved foreign keys (overrides `integrity.policy`).
    #[arg(long = "integrity", value_enum)]
    pub integrity: Option<IntegrityArg>,

    /// Also export the loaded tables to CSV.
    #[arg(long = "export")]
    pub export: bool,

    /// Export directory (overrides `paths.export_dir`).
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    /// SQLite database to query (overrides `paths.database`).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Write chart and data files per KPI to this directory
    /// (defaults to `paths.report_dir` with `--save`).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write chart and data files in addition to printing.
    #[arg(long = "save")]
    pub save: bool,

    /// Country tracked by the hires-over-time KPI; repeat for several.
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// SQLite database to export (overrides `paths.database`).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Export directory (overrides `paths.export_dir`).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IntegrityArg {
    Abort,
    Proceed,
}

impl From<IntegrityArg> for IntegrityPolicy {
    fn from(arg: IntegrityArg) -> Self {
        match arg {
            IntegrityArg::Abort => IntegrityPolicy::Abort,
            IntegrityArg::Proceed => IntegrityPolicy::Proceed,
        }
    }
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
