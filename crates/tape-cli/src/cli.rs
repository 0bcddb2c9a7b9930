//! CLI argument definitions for the tape auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tape-audit",
    version,
    about = "Validate residential loan tapes against the built-in rule catalogue",
    long_about = "Validate residential loan tapes.\n\n\
                  Tape columns are matched to rule parameters by normalized name; rules\n\
                  whose columns are absent are reported as skipped rather than failing\n\
                  the run. Results land in a report directory of CSV sheets plus a JSON\n\
                  document."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Include timestamps in log output.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a tape and write the report directory.
    Run(RunArgs),

    /// List the built-in rule catalogue.
    Rules,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the loan tape CSV file.
    #[arg(value_name = "TAPE")]
    pub tape: PathBuf,

    /// Report directory (default: ./tape-validation-report).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not append the run timestamp to the report directory name.
    #[arg(long = "no-timestamp")]
    pub no_timestamp: bool,

    /// Exit zero even when issues are found.
    #[arg(long = "no-fail-on-issues")]
    pub no_fail_on_issues: bool,
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
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
