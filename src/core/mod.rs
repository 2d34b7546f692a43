//! core/mod.rs
//!
//! The brain of the tool:
//! - Discover candidate audio file paths (filesystem walk)
//! - Match file paths against naming patterns (pure)
//! - Read/write tags (metadata IO)
//!
//! The batch pipeline is explicit and modular:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) per file: match -> merge static tags -> diff against file -> write
//!
//! A failure in (B) is recorded for that file and the batch moves on,
//! unless `fail_fast` is set.

pub mod library;
pub mod pattern;
pub mod tags;
pub mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use crate::error::ScanError;
use pattern::PatternSet;
use tags::WriteMode;
use types::{
    Change, FileReport, FileStatus, MatchResult, RunReport, TagField, TagSet, TagValue,
};

/// Per-run behaviour of [`tag_files`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
    pub mode: WriteMode,
    /// Stop at the first write failure.
    pub fail_fast: bool,
    /// Applied on top of captured tags for every matched file.
    pub static_tags: TagSet,
}

/// Discover candidate audio files under multiple roots.
///
/// - De-dupes across overlapping roots by full path
/// - Sorts paths once (core owns ordering, callers shouldn't)
pub fn scan_paths(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(1024);
    let mut out: Vec<PathBuf> = Vec::new();

    for root in roots {
        let paths = library::scan_audio(root, extensions)?;
        for path in paths {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}

/// Fields that writing `target` over `existing` would change.
pub fn plan_changes(existing: &TagSet, target: &TagSet, mode: WriteMode) -> Vec<Change> {
    let mut changes = Vec::new();

    for field in TagField::ALL {
        let old = existing.get(field);
        let new = target.get(field);
        let changed = match (old, new) {
            (_, Some(n)) => old != Some(n),
            (Some(_), None) => mode == WriteMode::Replace,
            (None, None) => false,
        };
        if changed {
            changes.push(Change {
                field,
                old: old.cloned(),
                new: new.cloned(),
            });
        }
    }

    changes
}

/// Keep `date` and `year` of the target consistent with each other.
///
/// - A `date` decides the `year` (date wins over a captured year).
/// - In merge mode a lone `year` moves the year of an existing full date
///   instead of clobbering it, and the new date shows up as a change.
pub fn reconcile_dates(target: &mut TagSet, existing: &TagSet, mode: WriteMode) {
    if target.contains(TagField::Date) {
        match target.text(TagField::Date).and_then(tags::util::parse_year) {
            Some(year) => {
                target.insert(TagField::Year, TagValue::Number(year));
            }
            None => {
                target.remove(TagField::Year);
            }
        }
        return;
    }

    if mode != WriteMode::Merge {
        return;
    }
    let Some(year) = target.number(TagField::Year) else {
        return;
    };
    if let Some(date) = existing
        .text(TagField::Date)
        .and_then(|d| tags::util::with_year(d, year))
    {
        target.insert(TagField::Date, TagValue::Text(date));
    }
}

/// Match, diff and (unless dry-run) write one file.
pub fn tag_file(path: &Path, patterns: &PatternSet, options: &RunOptions) -> FileReport {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();

    // Directory patterns need the parent components, so match the absolute path.
    let subject = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let (label, mut tags) = match patterns.match_path(&subject) {
        MatchResult::Matched { label, tags, .. } => (label, tags),
        MatchResult::NoMatch => {
            warn!("no pattern matches");
            return FileReport {
                path: path.to_path_buf(),
                pattern: None,
                tags: TagSet::new(),
                changes: Vec::new(),
                status: FileStatus::NoMatch,
            };
        }
    };
    tags.merge(&options.static_tags);

    let existing = match tags::read_tags(path) {
        Ok(existing) => existing,
        Err(e) => {
            // the write below will surface a real problem
            debug!(error = %e, "could not read existing tags");
            TagSet::new()
        }
    };
    reconcile_dates(&mut tags, &existing, options.mode);
    let changes = plan_changes(&existing, &tags, options.mode);

    let status = if changes.is_empty() {
        debug!("tags already up to date");
        FileStatus::Unchanged
    } else if options.dry_run {
        FileStatus::WouldWrite
    } else {
        match tags::write_tags(path, &tags, options.mode) {
            Ok(()) => {
                info!(pattern = %label, changes = changes.len(), "tags written");
                FileStatus::Written
            }
            Err(e) => {
                warn!(error = %e, "failed to write tags");
                FileStatus::Failed(e.to_string())
            }
        }
    };

    FileReport {
        path: path.to_path_buf(),
        pattern: Some(label),
        tags,
        changes,
        status,
    }
}

/// Run [`tag_file`] over `paths` in order.
pub fn tag_files(paths: &[PathBuf], patterns: &PatternSet, options: &RunOptions) -> RunReport {
    let mut report = RunReport::default();

    for path in paths {
        let file = tag_file(path, patterns, options);
        let failed = matches!(file.status, FileStatus::Failed(_));
        report.files.push(file);

        if failed && options.fail_fast {
            warn!(path = %path.display(), "stopping after first failure");
            report.aborted = true;
            break;
        }
    }

    report
}
