//! Data-mining table preprocessing CLI.

use clap::{ColorChoice, Parser};
use dmt_cli::logging::{LogConfig, LogFormat, init_logging};
use dmt_cli::pipeline::STDIO;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_classify, run_coverage, run_domains, run_merge, run_normalize, run_project, run_reduce,
    run_sort,
};
use crate::summary::print_summary;
use crate::types::RunReport;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Domains(args) => run_domains(args),
        Command::Reduce(args) => run_reduce(args),
        Command::Coverage(args) => run_coverage(args),
        Command::Project(args) => run_project(args),
        Command::Merge(args) => run_merge(args),
        Command::Sort(args) => run_sort(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Classify(args) => run_classify(args),
    };
    let exit_code = match result {
        Ok(report) => {
            // A table written to stdout must not be followed by the summary.
            if writes_to_file(&report) {
                print_summary(&report);
            } else {
                for note in &report.notes {
                    eprintln!("note: {note}");
                }
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn writes_to_file(report: &RunReport) -> bool {
    report
        .output
        .as_ref()
        .is_some_and(|path| path.as_os_str() != STDIO)
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
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
