//! Procedure report CLI.

use clap::{ColorChoice, Parser};
use procstat_cli::commands::{ReportRequest, run_columns, run_report};
use procstat_cli::logging::{LogConfig, LogFormat, init_logging};
use procstat_cli::render::Styling;
use procstat_cli::settings::{Settings, resolve_settings};
use procstat_ingest::Source;
use procstat_model::AggregateOptions;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{AggregationArgs, Cli, Command, LogFormatArg, LogLevelArg, ReportArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match resolve_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Report(args) => {
            let request = report_request(args, styling(cli.color.color));
            match run_report(&request, &settings) {
                Ok(outcome) => outcome.exit_code(),
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::Columns(args) => {
            let source = args
                .source
                .unwrap_or_else(|| Source::parse(&settings.source.location));
            let options = aggregate_options(&args.aggregation, &settings);
            match run_columns(&source, &options) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
    };
    std::process::exit(exit_code);
}

fn report_request(args: ReportArgs, styling: Styling) -> ReportRequest {
    ReportRequest {
        source: args.source,
        format: args.format.map(Into::into),
        output: args.output,
        column_discovery: args.aggregation.columns.map(Into::into),
        name_matching: args.aggregation.names.map(Into::into),
        year_column: args.aggregation.year_column,
        compare: args.compare,
        bar_width: args.bar_width,
        styling,
    }
}

fn aggregate_options(args: &AggregationArgs, settings: &Settings) -> AggregateOptions {
    ReportRequest {
        column_discovery: args.columns.map(Into::into),
        name_matching: args.names.map(Into::into),
        year_column: args.year_column.clone(),
        ..ReportRequest::default()
    }
    .aggregate_options(settings)
}

fn styling(choice: ColorChoice) -> Styling {
    match choice {
        ColorChoice::Always => Styling::Always,
        ColorChoice::Never => Styling::Never,
        ColorChoice::Auto => Styling::Auto,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
