//! CLI argument definitions for the table tools.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dmt_model::DEFAULT_PRECISION;

#[derive(Parser)]
#[command(
    name = "dmt",
    version,
    about = "Preprocess weighted data-mining tables",
    long_about = "Preprocess delimited data-mining tables.\n\n\
                  Extracts attribute domains, reduces duplicate tuples to weights, builds\n\
                  one-point coverage tables, projects, merges, sorts and normalizes columns,\n\
                  and classifies attributes for plotting."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Describe the domain of every attribute.
    Domains(DomainsArgs),

    /// Merge duplicate tuples into weighted tuples.
    Reduce(ReduceArgs),

    /// Build the one-point coverage table.
    Coverage(CoverageArgs),

    /// Keep a subset of the columns.
    Project(ProjectArgs),

    /// Concatenate tables with the same attributes.
    Merge(MergeArgs),

    /// Sort tuples by key attributes.
    Sort(SortArgs),

    /// Standardize or range-map numeric columns.
    Normalize(NormalizeArgs),

    /// Split attributes into metric and nominal axes.
    Classify(ClassifyArgs),
}

/// How the input text is split and typed.
#[derive(Args, Clone)]
pub struct ReadArgs {
    /// Field delimiter (also used for output).
    #[arg(long = "delimiter", short = 'd', default_value_t = ',')]
    pub delimiter: char,

    /// The first record is data, not attribute names.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Text standing for a missing value.
    #[arg(long = "null-marker", default_value = "?")]
    pub null_marker: String,

    /// The last field of every record is the tuple weight.
    #[arg(long = "weighted")]
    pub weighted: bool,

    /// Significant digits written for float columns.
    #[arg(long = "precision", default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    /// Number that stands for a missing value in numeric columns.
    #[arg(long = "null-value", value_name = "N", allow_hyphen_values = true)]
    pub null_value: Option<i64>,
}

/// Where and how the resulting table is written.
#[derive(Args, Clone)]
pub struct WriteArgs {
    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pad fields so that columns line up.
    #[arg(long = "align")]
    pub align: bool,

    /// Append the tuple weight as a trailing field.
    #[arg(long = "write-weights")]
    pub write_weights: bool,
}

#[derive(Args)]
pub struct DomainsArgs {
    /// Input table ("-" for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    /// Order of nominal labels ("none" keeps first-appearance order).
    #[arg(long = "sort", value_enum, default_value = "lex")]
    pub sort: DomainSortArg,

    /// Describe metric domains by interval (false lists occurring values).
    #[arg(long = "intervals", action = ArgAction::Set, default_value_t = true)]
    pub intervals: bool,

    /// Maximum line width.
    #[arg(long = "width", default_value_t = 78)]
    pub width: usize,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReduceArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

#[derive(Args)]
pub struct CoverageArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,

    /// Keep one row per value occurrence instead of merging them.
    #[arg(long = "full")]
    pub full: bool,

    /// Divide weights by the largest weight of their attribute.
    #[arg(long = "normalize")]
    pub normalize: bool,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,

    /// Columns to keep, in output order.
    #[arg(long = "columns", value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    /// Reduce the projected table.
    #[arg(long = "reduce")]
    pub reduce: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Input tables, merged in order.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

#[derive(Args)]
pub struct SortArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,

    /// Sort keys, most significant first (default: all columns).
    #[arg(long = "keys", value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Sort in descending order.
    #[arg(long = "descending")]
    pub descending: bool,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    #[command(flatten)]
    pub write: WriteArgs,

    /// Column to normalize; repeat for several (default: all numeric columns).
    #[arg(long = "column")]
    pub columns: Vec<String>,

    /// Target mean, or lower end of the target range.
    #[arg(long = "center", default_value_t = 0.0, allow_hyphen_values = true)]
    pub center: f64,

    /// Target deviation if positive, minus the target range width if negative.
    #[arg(long = "scale", default_value_t = 1.0, allow_hyphen_values = true)]
    pub scale: f64,
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,

    /// Fraction of each metric range added on both sides.
    #[arg(long = "padding", default_value_t = 0.05)]
    pub padding: f64,

    /// Print the classification as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// Label orders for `domains --sort`.
#[derive(Clone, Copy, ValueEnum)]
pub enum DomainSortArg {
    Lex,
    Numeric,
    None,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse arguments")
    }

    #[test]
    fn domains_sort_labels_lexicographically_by_default() {
        let Command::Domains(args) = parse(&["dmt", "domains", "in.csv"]).command else {
            panic!("expected the domains command");
        };
        assert!(matches!(args.sort, DomainSortArg::Lex));
        assert!(args.intervals);
        assert_eq!(args.width, 78);
    }

    #[test]
    fn domains_sort_can_keep_appearance_order() {
        let cli = parse(&["dmt", "domains", "in.csv", "--sort", "none"]);
        let Command::Domains(args) = cli.command else {
            panic!("expected the domains command");
        };
        assert!(matches!(args.sort, DomainSortArg::None));
    }

    #[test]
    fn read_args_accept_precision_and_negative_null_value() {
        let cli = parse(&["dmt", "reduce", "in.csv", "--precision", "3", "--null-value", "-1"]);
        let Command::Reduce(args) = cli.command else {
            panic!("expected the reduce command");
        };
        assert_eq!(args.read.precision, 3);
        assert_eq!(args.read.null_value, Some(-1));
    }
}
