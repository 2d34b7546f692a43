//! Core data types shared between matching, tag IO and reporting.
//!
//! Rule of thumb:
//! - These types should be "boring bags of data"
//! - No regex code
//! - No filesystem code
//! - No tag library code
//!
//! `TagSet` is the hand-off point: the matcher produces one per file,
//! the tag writer consumes it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A tag field nametag knows how to fill.
///
/// Declaration order is the display order of a [`TagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Track,
    TrackTotal,
    Disc,
    DiscTotal,
    Year,
    Date,
    Genre,
    Composer,
    Comment,
}

impl TagField {
    pub const ALL: [TagField; 13] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::AlbumArtist,
        TagField::Track,
        TagField::TrackTotal,
        TagField::Disc,
        TagField::DiscTotal,
        TagField::Year,
        TagField::Date,
        TagField::Genre,
        TagField::Composer,
        TagField::Comment,
    ];

    /// Canonical name, as used in capture groups, config files and output.
    pub fn name(self) -> &'static str {
        match self {
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::AlbumArtist => "album_artist",
            TagField::Track => "track",
            TagField::TrackTotal => "track_total",
            TagField::Disc => "disc",
            TagField::DiscTotal => "disc_total",
            TagField::Year => "year",
            TagField::Date => "date",
            TagField::Genre => "genre",
            TagField::Composer => "composer",
            TagField::Comment => "comment",
        }
    }

    /// Resolve a capture group / config key to a field.
    ///
    /// Case-insensitive; `_` and `-` are ignored, so `albumartist`,
    /// `album_artist` and `Album-Artist` are the same field.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let field = match key.as_str() {
            "title" => TagField::Title,
            "artist" => TagField::Artist,
            "album" => TagField::Album,
            "albumartist" => TagField::AlbumArtist,
            "track" | "tracknumber" | "trackno" => TagField::Track,
            "tracktotal" | "totaltracks" => TagField::TrackTotal,
            "disc" | "discnumber" | "discno" => TagField::Disc,
            "disctotal" | "totaldiscs" => TagField::DiscTotal,
            "year" => TagField::Year,
            "date" => TagField::Date,
            "genre" => TagField::Genre,
            "composer" => TagField::Composer,
            "comment" => TagField::Comment,
            _ => return None,
        };
        Some(field)
    }

    /// Numeric fields always carry [`TagValue::Number`].
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TagField::Track
                | TagField::TrackTotal
                | TagField::Disc
                | TagField::DiscTotal
                | TagField::Year
        )
    }

    /// The "total" companion of a numbering field (`track` -> `track_total`).
    pub fn total_field(self) -> Option<TagField> {
        match self {
            TagField::Track => Some(TagField::TrackTotal),
            TagField::Disc => Some(TagField::DiscTotal),
            _ => None,
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one tag field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Number(u32),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            TagValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            TagValue::Number(n) => Some(*n),
            TagValue::Text(_) => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) => f.write_str(s),
            TagValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Field -> value mapping for one file. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    fields: BTreeMap<TagField, TagValue>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, field: TagField, value: TagValue) -> Option<TagValue> {
        self.fields.insert(field, value)
    }

    pub fn get(&self, field: TagField) -> Option<&TagValue> {
        self.fields.get(&field)
    }

    pub fn remove(&mut self, field: TagField) -> Option<TagValue> {
        self.fields.remove(&field)
    }

    pub fn contains(&self, field: TagField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn text(&self, field: TagField) -> Option<&str> {
        self.get(field).and_then(TagValue::as_text)
    }

    pub fn number(&self, field: TagField) -> Option<u32> {
        self.get(field).and_then(TagValue::as_number)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = TagField> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagField, &TagValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: &TagSet) {
        for (field, value) in other.iter() {
            self.fields.insert(field, value.clone());
        }
    }
}

impl FromIterator<(TagField, TagValue)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (TagField, TagValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of matching one path against a pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched {
        /// Index of the winning pattern in the set (priority order).
        pattern: usize,
        /// Pattern name, or its regex source when unnamed.
        label: String,
        tags: TagSet,
    },
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn tags(&self) -> Option<&TagSet> {
        match self {
            MatchResult::Matched { tags, .. } => Some(tags),
            MatchResult::NoMatch => None,
        }
    }
}

/// One field that a write would change.
///
/// `new == None` means the field is removed (replace mode only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub field: TagField,
    pub old: Option<TagValue>,
    pub new: Option<TagValue>,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<TagValue>| match v {
            Some(v) => v.to_string(),
            None => "-".to_string(),
        };
        write!(f, "{}: {} -> {}", self.field, show(&self.old), show(&self.new))
    }
}

/// What happened to one file during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Written,
    /// Dry run: tags would have been written.
    WouldWrite,
    /// Tags already hold the target values; nothing written.
    Unchanged,
    NoMatch,
    Failed(String),
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Written => "written",
            FileStatus::WouldWrite => "would write",
            FileStatus::Unchanged => "unchanged",
            FileStatus::NoMatch => "no match",
            FileStatus::Failed(_) => "failed",
        }
    }
}

/// Per-file result of a tagging run.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Label of the pattern that matched, if any.
    pub pattern: Option<String>,
    pub tags: TagSet,
    pub changes: Vec<Change>,
    pub status: FileStatus,
}

/// Result of a whole batch.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// True when `fail_fast` stopped the run early.
    pub aborted: bool,
}

impl RunReport {
    pub fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }

    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Written | FileStatus::WouldWrite))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Unchanged))
    }

    pub fn no_match(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::NoMatch))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed(_)))
    }

    /// Process exit status for this run.
    /// - 1 if any write failed
    /// - 1 if `strict` and any file matched no pattern
    /// - 0 otherwise
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.failed() > 0 || (strict && self.no_match() > 0) {
            1
        } else {
            0
        }
    }
}
