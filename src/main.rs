//! nametag CLI
//!
//! # What this program is
//! A command-line tool that reads structured information (artist, album,
//! track number, title, ...) out of audio file paths with regular expressions,
//! then writes it into the files' tags.
//!
//! # Flow (one run)
//! - Build the pattern set: `--pattern` flags, then config file patterns,
//!   then the built-in conventions.
//! - Walk the given paths for audio files.
//! - For each file: first matching pattern -> TagSet -> diff -> write.
//! - Print a table of what happened and exit non-zero on failures.
//!
//! # Exit status
//! - 0: everything matched (or was allowed not to) and was written
//! - 1: at least one write failed (or, with `--strict`, a file matched nothing)
//! - 2: bad configuration, bad pattern, or a path that does not exist

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use nametag::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_check, run_patterns, run_tag};
use crate::summary::{print_check, print_patterns, print_report};

const EXIT_USAGE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_USAGE);
    }

    let exit_code = match cli.command {
        Command::Tag(args) => match run_tag(&args) {
            Ok(report) => {
                print_report(&report, args.dry_run);
                report.exit_code(args.strict)
            }
            Err(err) => fail(&err),
        },
        Command::Check(args) => match run_check(&args) {
            Ok(results) => {
                print_check(&results);
                0
            }
            Err(err) => fail(&err),
        },
        Command::Patterns(args) => match run_patterns(&args) {
            Ok(patterns) => {
                print_patterns(&patterns);
                0
            }
            Err(err) => fail(&err),
        },
    };
    std::process::exit(exit_code);
}

fn fail(err: &anyhow::Error) -> i32 {
    eprintln!("error: {err:#}");
    EXIT_USAGE
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

    LogConfig {
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        ..LogConfig::default()
    }
    .with_level(level_filter)
    .with_format(format)
    .with_ansi(with_ansi)
    .with_log_file(cli.log_file.clone())
}
