//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "nametag",
    version,
    about = "Set audio file tags based on file name",
    long_about = "Set audio file tags based on file name.\n\n\
                  File paths are matched against regular expressions whose named\n\
                  groups are tag fields (artist, album, track, title, ...). The first\n\
                  pattern that matches wins; its captures are written into the file."
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
    /// Match audio files and write their tags.
    Tag(TagArgs),

    /// Show what file names would match, without touching any file.
    Check(CheckArgs),

    /// List the effective patterns in priority order.
    Patterns(PatternsArgs),
}

/// Pattern sources and matching options, shared by all subcommands.
#[derive(Args)]
pub struct PatternOptions {
    /// Config file with patterns, static tags and options (TOML).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Naming pattern (regex with named groups); repeatable, tried in order
    /// before config and built-in patterns.
    #[arg(short = 'p', long = "pattern", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Do not try the built-in patterns.
    #[arg(long = "no-builtin")]
    pub no_builtin: bool,

    /// Treat '_' as a space in captured text.
    #[arg(short = 'u', long = "underscores")]
    pub underscores: bool,

    /// Match patterns case-insensitively.
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Static tag applied to every matched file (e.g. genre=Jazz); repeatable.
    #[arg(short = 's', long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}

#[derive(Args)]
pub struct TagArgs {
    /// Audio files or directories to process.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub patterns: PatternOptions,

    /// Extension to pick up when walking directories; repeatable
    /// (default: common audio formats).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Report what would change without writing anything.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Remove known tag fields that no capture or static tag provides.
    #[arg(long = "replace")]
    pub replace: bool,

    /// Stop at the first file that fails to write.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Exit with an error status when a file matches no pattern.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// File names (or relative paths) to match.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub patterns: PatternOptions,
}

#[derive(Args)]
pub struct PatternsArgs {
    #[command(flatten)]
    pub patterns: PatternOptions,
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
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tag_command() {
        let cli = Cli::try_parse_from([
            "nametag", "tag", "-n", "--set", "genre=Jazz", "-p", r"(?P<title>.+)", "music",
        ])
        .unwrap();
        let Command::Tag(args) = cli.command else {
            panic!("expected tag command");
        };
        assert!(args.dry_run);
        assert_eq!(args.paths, vec![PathBuf::from("music")]);
        assert_eq!(args.patterns.set, vec!["genre=Jazz".to_string()]);
        assert_eq!(args.patterns.patterns.len(), 1);
    }

    #[test]
    fn tag_requires_paths() {
        assert!(Cli::try_parse_from(["nametag", "tag"]).is_err());
    }
}
