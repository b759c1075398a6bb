//! CLI argument definitions for the watcher daemon.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mrwatch",
    version,
    about = "Mirror GitLab merge-request review state into a Google Spreadsheet",
    long_about = "Polls a GitLab group's merge requests, classifies their review state\n\
                  and atomically replaces the contents of the tracking spreadsheet.\n\
                  Configuration is read from the environment (a .env file is honored)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q to quieten).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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

    /// Load environment variables from this file instead of ./.env.
    #[arg(long = "env-file", value_name = "PATH", global = true)]
    pub env_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll forever, publishing the tables every interval.
    Run(RunArgs),

    /// Run a single iteration and print a summary of what was published.
    Once,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Override the configured iteration interval, in seconds.
    #[arg(long = "interval", value_name = "SECONDS")]
    pub interval: Option<u64>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
