//! core/pattern/mod.rs
//!
//! Filename pattern matching: path in, `MatchResult` out.
//!
//! - A [`Pattern`] is one regex whose named groups are tag field names.
//! - A [`PatternSet`] is an ordered list of patterns; the first that matches wins.
//! - Matching is pure: no filesystem access, no hidden global state.
//!
//! Each pattern sees only the tail of the path: as many components as it has
//! `/` separators plus one. So `(?P<album>[^/]+)/(?P<title>.+)\.mp3` is matched
//! against `Album/Song.mp3`, never against the full absolute path.

mod builtin;
pub(crate) mod normalize;

use std::path::{Component, Path};

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use super::types::{MatchResult, TagField, TagSet, TagValue};
use crate::error::PatternError;
use normalize::Normalized;

pub use builtin::BUILTIN_PATTERNS;

/// Knobs that affect how patterns are compiled and captures normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Treat `_` as a space in text captures.
    pub underscores: bool,
    /// Compile patterns case-insensitively.
    pub ignore_case: bool,
}

/// One compiled naming pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: Option<String>,
    regex: Regex,
    /// (group name, field) in group order
    groups: Vec<(String, TagField)>,
    depth: usize,
    underscores: bool,
}

impl Pattern {
    /// Compile an unnamed pattern.
    pub fn new(source: &str, options: MatchOptions) -> Result<Self, PatternError> {
        Self::build(None, source, options)
    }

    /// Compile a pattern with a display name.
    pub fn named(name: &str, source: &str, options: MatchOptions) -> Result<Self, PatternError> {
        Self::build(Some(name.to_string()), source, options)
    }

    fn build(
        name: Option<String>,
        source: &str,
        options: MatchOptions,
    ) -> Result<Self, PatternError> {
        if source.trim().is_empty() {
            return Err(PatternError::Empty);
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(options.ignore_case)
            .build()
            .map_err(|source_err| PatternError::InvalidRegex {
                pattern: source.to_string(),
                source: source_err,
            })?;

        let mut groups = Vec::new();
        for group in regex.capture_names().flatten() {
            let field = TagField::from_name(group).ok_or_else(|| PatternError::UnknownField {
                pattern: source.to_string(),
                group: group.to_string(),
            })?;
            groups.push((group.to_string(), field));
        }

        Ok(Self {
            name,
            regex,
            groups,
            depth: path_depth(source),
            underscores: options.underscores,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// Name if set, otherwise the regex source.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.regex.as_str())
    }

    /// Number of trailing path components this pattern is matched against.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Tag fields this pattern can produce, in group order.
    pub fn fields(&self) -> impl Iterator<Item = TagField> + '_ {
        self.groups.iter().map(|(_, f)| *f)
    }

    /// Match `path` and build its TagSet.
    ///
    /// `None` when the regex does not match, the path is too shallow for this
    /// pattern, or a numeric group captured something that is not a number.
    pub fn captures(&self, path: &Path) -> Option<TagSet> {
        let subject = subject(path, self.depth)?;
        let caps = self.regex.captures(&subject)?;

        let mut tags = TagSet::new();
        let mut implied_totals: Vec<(TagField, u32)> = Vec::new();

        for (group, field) in &self.groups {
            let Some(m) = caps.name(group) else {
                continue;
            };
            if tags.contains(*field) {
                // two aliases of one field: first participating group wins
                continue;
            }

            match normalize::normalize_value(*field, m.as_str(), self.underscores) {
                Normalized::Skip => {}
                Normalized::Value(value) => {
                    tags.insert(*field, value);
                }
                Normalized::WithTotal(n, total) => {
                    tags.insert(*field, TagValue::Number(n));
                    if let Some(total_field) = field.total_field() {
                        implied_totals.push((total_field, total));
                    }
                }
                Normalized::Invalid => {
                    debug!(
                        pattern = self.label(),
                        group = group.as_str(),
                        value = m.as_str(),
                        "numeric group captured a non-number; pattern skipped"
                    );
                    return None;
                }
            }
        }

        // an explicit total group beats "n/total" inside the number group
        for (field, total) in implied_totals {
            if !tags.contains(field) {
                tags.insert(field, TagValue::Number(total));
            }
        }

        Some(tags)
    }
}

/// Ordered, immutable-once-built list of patterns. First match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Compile unnamed sources, keeping their order.
    pub fn compile<I, S>(sources: I, options: MatchOptions) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|s| Pattern::new(s.as_ref(), options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The built-in naming conventions, most specific first.
    pub fn builtin(options: MatchOptions) -> Result<Self, PatternError> {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, source)| Pattern::named(name, source, options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Append `other` after the current patterns (lower priority).
    pub fn extend(&mut self, other: PatternSet) {
        self.patterns.extend(other.patterns);
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Try every pattern in order; the first that yields a TagSet wins.
    pub fn match_path(&self, path: impl AsRef<Path>) -> MatchResult {
        let path = path.as_ref();

        for (index, pattern) in self.patterns.iter().enumerate() {
            trace!(pattern = pattern.label(), path = %path.display(), "trying pattern");
            if let Some(tags) = pattern.captures(path) {
                debug!(pattern = pattern.label(), path = %path.display(), "matched");
                return MatchResult::Matched {
                    pattern: index,
                    label: pattern.label().to_string(),
                    tags,
                };
            }
        }

        MatchResult::NoMatch
    }
}

/// Join the last `depth` normal components of `path` with `/`.
///
/// `..` is resolved lexically, so `Artist/Other/../Album/x.mp3` is seen as
/// `Artist/Album/x.mp3`.
fn subject(path: &Path, depth: usize) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }

    if parts.is_empty() || parts.len() < depth {
        return None;
    }
    Some(parts[parts.len() - depth..].join("/"))
}

/// 1 + number of `/` in `source` outside character classes.
fn path_depth(source: &str) -> usize {
    let mut depth = 1;
    let mut class = 0usize;
    let mut class_start = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        // `]` right after `[` or `[^` is a literal
        let just_opened = std::mem::take(&mut class_start);
        match c {
            '\\' => {
                // `\/` still matches a literal separator
                if chars.next() == Some('/') && class == 0 {
                    depth += 1;
                }
            }
            '[' => {
                class += 1;
                class_start = true;
                if chars.peek() == Some(&'^') {
                    chars.next();
                }
            }
            ']' if class > 0 && !just_opened => class -= 1,
            '/' if class == 0 => depth += 1,
            _ => {}
        }
    }

    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MatchOptions {
        MatchOptions::default()
    }

    #[test]
    fn depth_counts_separators_outside_classes() {
        assert_eq!(path_depth(r"^(?P<title>.+)\.mp3$"), 1);
        assert_eq!(path_depth(r"^(?P<album>[^/]+)/(?P<title>[^/]+)$"), 2);
        assert_eq!(path_depth(r"a\/b/c"), 3);
        assert_eq!(path_depth(r"[]/]x"), 1);
        assert_eq!(path_depth(r"[^]/]/x"), 2);
        assert_eq!(path_depth(r"[[:alpha:]/]+/x"), 2);
    }

    #[test]
    fn subject_takes_path_tail() {
        let p = Path::new("/music/Artist/Album/01 Song.mp3");
        assert_eq!(subject(p, 1).as_deref(), Some("01 Song.mp3"));
        assert_eq!(subject(p, 3).as_deref(), Some("Artist/Album/01 Song.mp3"));
        assert_eq!(subject(Path::new("Song.mp3"), 2), None);
        assert_eq!(subject(Path::new(""), 1), None);
    }

    #[test]
    fn subject_resolves_parent_components() {
        let p = Path::new("/music/Miles Davis/Kind of Blue/../Sketches/01 Concierto.mp3");
        assert_eq!(
            subject(p, 3).as_deref(),
            Some("Miles Davis/Sketches/01 Concierto.mp3")
        );
        assert_eq!(subject(Path::new("../x.mp3"), 1).as_deref(), Some("x.mp3"));
    }

    #[test]
    fn escaped_separator_spans_components() {
        let p = Pattern::new(r"^(?P<album>[^/]+)\/(?P<title>[^/]+)\.mp3$", opts()).unwrap();
        assert_eq!(p.depth(), 2);
        let tags = p.captures(Path::new("/m/Album/Song.mp3")).unwrap();
        assert_eq!(tags.text(TagField::Album), Some("Album"));
        assert_eq!(tags.text(TagField::Title), Some("Song"));
    }

    #[test]
    fn unknown_group_is_rejected() {
        let err = Pattern::new(r"(?P<bitrate>\d+)", opts()).unwrap_err();
        assert!(matches!(err, PatternError::UnknownField { ref group, .. } if group == "bitrate"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = Pattern::new(r"(?P<title>.+", opts()).unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
        assert!(matches!(Pattern::new("  ", opts()), Err(PatternError::Empty)));
    }

    #[test]
    fn explicit_total_beats_slash_total() {
        let p = Pattern::new(r"^(?P<track>\d+/\d+) of (?P<tracktotal>\d+)", opts()).unwrap();
        let tags = p.captures(Path::new("3/12 of 14.mp3")).unwrap();
        assert_eq!(tags.number(TagField::Track), Some(3));
        assert_eq!(tags.number(TagField::TrackTotal), Some(14));
    }

    #[test]
    fn slash_total_fills_missing_total() {
        // the '/' is a separator, so the pattern spans two components
        let p = Pattern::new(r"^(?P<track>\d+/\d+) (?P<title>.+)\.ogg$", opts()).unwrap();
        assert_eq!(p.depth(), 2);
        let tags = p.captures(Path::new("3/12 x.ogg")).unwrap();
        assert_eq!(tags.number(TagField::Track), Some(3));
        assert_eq!(tags.number(TagField::TrackTotal), Some(12));
        assert_eq!(tags.text(TagField::Title), Some("x"));
    }

    #[test]
    fn non_numeric_number_group_skips_pattern() {
        let p = Pattern::new(r"^(?P<track>\S+) (?P<title>.+)\.ogg$", opts()).unwrap();
        assert!(p.captures(Path::new("3-12 x.ogg")).is_none());
        assert!(p.captures(Path::new("07 x.ogg")).is_some());
    }

    #[test]
    fn label_falls_back_to_source() {
        let p = Pattern::new(r"(?P<title>.+)", opts()).unwrap();
        assert_eq!(p.label(), "(?P<title>.+)");
        let p = Pattern::named("everything", r"(?P<title>.+)", opts()).unwrap();
        assert_eq!(p.label(), "everything");
    }
}
