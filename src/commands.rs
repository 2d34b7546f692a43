use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use nametag::config::apply_tag_assignment;
use nametag::core::RunOptions;
use nametag::{Config, MatchResult, PatternSet, RunReport, TagSet, WriteMode};

use crate::cli::{CheckArgs, PatternOptions, PatternsArgs, TagArgs};

/// Config file (if any) with the CLI flags layered on top.
fn effective_config(opts: &PatternOptions) -> Result<Config> {
    let mut config = match &opts.config {
        Some(path) => Config::load(path).context("load config")?,
        None => Config::default(),
    };

    // CLI patterns go first: they are the most specific intent
    let cli_patterns = opts.patterns.iter().map(|regex| nametag::config::PatternConfig {
        name: None,
        regex: regex.clone(),
    });
    config.patterns = cli_patterns.chain(config.patterns).collect();

    if opts.no_builtin {
        config.builtin = false;
    }
    config.underscores |= opts.underscores;
    config.ignore_case |= opts.ignore_case;

    Ok(config)
}

fn resolve(opts: &PatternOptions) -> Result<(Config, PatternSet, TagSet)> {
    let config = effective_config(opts)?;
    let patterns = config.pattern_set().context("compile patterns")?;

    let mut static_tags = config.static_tags().context("config tags")?;
    for assignment in &opts.set {
        apply_tag_assignment(&mut static_tags, assignment).context("--set")?;
    }

    debug!(
        patterns = patterns.len(),
        static_tags = %static_tags,
        "configuration resolved"
    );
    Ok((config, patterns, static_tags))
}

pub fn run_tag(args: &TagArgs) -> Result<RunReport> {
    let (mut config, patterns, static_tags) = resolve(&args.patterns)?;
    if !args.extensions.is_empty() {
        config.extensions = args
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }

    let span = info_span!("tag", dry_run = args.dry_run);
    let _guard = span.enter();
    let start = Instant::now();

    let paths = nametag::scan_paths(&args.paths, &config.extensions).context("discover files")?;
    info!(files = paths.len(), "discovered audio files");

    let options = RunOptions {
        dry_run: args.dry_run,
        mode: if args.replace {
            WriteMode::Replace
        } else {
            WriteMode::Merge
        },
        fail_fast: args.fail_fast,
        static_tags,
    };
    let report = nametag::tag_files(&paths, &patterns, &options);

    info!(
        written = report.written(),
        unchanged = report.unchanged(),
        no_match = report.no_match(),
        failed = report.failed(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "run finished"
    );
    Ok(report)
}

/// Pure matching of names; static tags are shown merged in, as `tag` would.
pub fn run_check(args: &CheckArgs) -> Result<Vec<(String, MatchResult)>> {
    let (_, patterns, static_tags) = resolve(&args.patterns)?;

    let results = args
        .names
        .iter()
        .map(|name| {
            let result = match patterns.match_path(name) {
                MatchResult::Matched {
                    pattern,
                    label,
                    mut tags,
                } => {
                    tags.merge(&static_tags);
                    MatchResult::Matched {
                        pattern,
                        label,
                        tags,
                    }
                }
                MatchResult::NoMatch => MatchResult::NoMatch,
            };
            (name.clone(), result)
        })
        .collect();

    Ok(results)
}

pub fn run_patterns(args: &PatternsArgs) -> Result<PatternSet> {
    let (_, patterns, _) = resolve(&args.patterns)?;
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};
    use nametag::TagField;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("nametag").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn check_matches_names_and_merges_static_tags() {
        let Command::Check(args) = parse(&[
            "check",
            "--no-builtin",
            "-p",
            r"^(?P<artist>.+) - (?P<title>.+)\.flac$",
            "-s",
            "genre=Jazz",
            "Artist - Title.flac",
            "randomfile.txt",
        ]) else {
            panic!("expected check command");
        };

        let results = run_check(&args).unwrap();
        assert_eq!(results.len(), 2);

        let tags = results[0].1.tags().unwrap();
        assert_eq!(tags.text(TagField::Artist), Some("Artist"));
        assert_eq!(tags.text(TagField::Genre), Some("Jazz"));
        assert_eq!(results[1].1, MatchResult::NoMatch);
    }

    #[test]
    fn cli_patterns_come_before_builtins() {
        let Command::Patterns(args) = parse(&["patterns", "-p", r"(?P<title>.+)"]) else {
            panic!("expected patterns command");
        };

        let patterns = run_patterns(&args).unwrap();
        assert!(patterns.len() > 1);
        assert_eq!(
            patterns.iter().next().map(|p| p.source()),
            Some("(?P<title>.+)")
        );
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let Command::Check(args) = parse(&["check", "-p", r"(?P<mood>.+)", "x.mp3"]) else {
            panic!("expected check command");
        };
        assert!(run_check(&args).is_err());
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let Command::Tag(args) = parse(&["tag", "-n", missing.to_str().unwrap()]) else {
            panic!("expected tag command");
        };
        assert!(run_tag(&args).is_err());
    }
}
