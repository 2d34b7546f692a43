//! nametag: set audio file tags based on file name.
//!
//! File paths are matched against an ordered list of regular expressions whose
//! named capture groups are tag fields (`artist`, `album`, `track`, `title`,
//! ...). The first pattern that matches produces a [`TagSet`], which is then
//! written into the file with `id3` (MP3) or `lofty` (everything else).
//!
//! ```
//! use nametag::{MatchOptions, PatternSet, TagField};
//!
//! let patterns = PatternSet::compile(
//!     [r"^(?P<artist>.+) - (?P<title>.+)\.flac$"],
//!     MatchOptions::default(),
//! )
//! .unwrap();
//!
//! let result = patterns.match_path("Artist - Title.flac");
//! let tags = result.tags().unwrap();
//! assert_eq!(tags.text(TagField::Artist), Some("Artist"));
//! assert_eq!(tags.text(TagField::Title), Some("Title"));
//!
//! assert!(!patterns.match_path("randomfile.txt").is_match());
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use crate::config::Config;
pub use crate::core::pattern::{MatchOptions, Pattern, PatternSet};
pub use crate::core::tags::{WriteMode, read_tags, write_tags};
pub use crate::core::types::{
    Change, FileReport, FileStatus, MatchResult, RunReport, TagField, TagSet, TagValue,
};
pub use crate::core::{RunOptions, scan_paths, tag_file, tag_files};
pub use crate::error::{ConfigError, PatternError, ScanError, TagError};
