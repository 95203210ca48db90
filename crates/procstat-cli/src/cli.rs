//! CLI argument definitions for the procedure report tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use procstat_ingest::Source;
use procstat_model::{ColumnDiscovery, NameMatching};
use procstat_cli::settings::ReportFormat;

#[derive(Parser)]
#[command(
    name = "procstat",
    version,
    about = "Procedure counts per year from a procedure CSV",
    long_about = "Count medical procedures per year (2022-2024) and in total.\n\n\
                  Reads a CSV with an AÑO column and one or more PROCEDIM* columns\n\
                  from a local path or an http(s) URL, and renders charts and a\n\
                  detail table, or the view model as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Include procedure names in trace logs (medical data, off by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML settings file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count procedures per year and render the report.
    Report(ReportArgs),

    /// List CSV headers with their detected role.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// CSV path or http(s) URL (default: dados.csv).
    #[arg(value_name = "SOURCE")]
    pub source: Option<Source>,

    /// Output format.
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Write the report to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub aggregation: AggregationArgs,

    /// Add a totals chart restricted to procedures containing KEYWORD.
    #[arg(long = "compare", value_name = "KEYWORD")]
    pub compare: Vec<String>,

    /// Width of the longest bar, in characters.
    #[arg(long = "bar-width", value_name = "N")]
    pub bar_width: Option<usize>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// CSV path or http(s) URL (default: dados.csv).
    #[arg(value_name = "SOURCE")]
    pub source: Option<Source>,

    #[command(flatten)]
    pub aggregation: AggregationArgs,
}

#[derive(clap::Args)]
pub struct AggregationArgs {
    /// Procedure column discovery.
    #[arg(long = "columns", value_enum)]
    pub columns: Option<ColumnsArg>,

    /// Procedure name matching.
    #[arg(long = "names", value_enum)]
    pub names: Option<NamesArg>,

    /// Name of the year column.
    #[arg(long = "year-column", value_name = "NAME")]
    pub year_column: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColumnsArg {
    /// Every column containing PROCEDIMENTO.
    Single,
    /// Every column containing PROCEDIM.
    Multi,
}

impl From<ColumnsArg> for ColumnDiscovery {
    fn from(value: ColumnsArg) -> Self {
        match value {
            ColumnsArg::Single => Self::Single,
            ColumnsArg::Multi => Self::Multi,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NamesArg {
    /// Trim only; names are case-sensitive.
    Raw,
    /// Trim and upper-case.
    Normalized,
}

impl From<NamesArg> for NameMatching {
    fn from(value: NamesArg) -> Self {
        match value {
            NamesArg::Raw => Self::Raw,
            NamesArg::Normalized => Self::Normalized,
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
