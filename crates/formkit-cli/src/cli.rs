//! CLI argument definitions for `formkit`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formkit",
    version,
    about = "Rank option catalogs and replay typeahead event scripts"
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

    /// Log output format.
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
    /// Rank a catalog against a query and print the render list.
    Rank(RankArgs),

    /// Dispatch a script of host events and print the state after each.
    Replay(ReplayArgs),
}

/// Engine settings shared by every subcommand.
#[derive(Args)]
pub struct EngineArgs {
    /// JSON engine configuration (`limit`, `matcher`, `mode`).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of rendered results.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Ranking strategy.
    #[arg(long = "matcher", value_enum)]
    pub matcher: Option<MatcherArg>,

    /// Minimum similarity score; needs the similarity matcher from
    /// `--matcher` or the config file.
    #[arg(long = "min-score", value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Use tagged (multi-select) mode.
    #[arg(long = "tagged")]
    pub tagged: bool,
}

#[derive(Args)]
pub struct RankArgs {
    /// JSON array of `{title, value, chip}` options.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Search text.
    #[arg(long = "query", default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON array of script steps.
    #[arg(long = "script", value_name = "FILE")]
    pub script: PathBuf,

    /// Catalog installed before the first step.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print each step's engine view as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MatcherArg {
    Subsequence,
    Similarity,
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
