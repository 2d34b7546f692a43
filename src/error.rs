//! Error types for matching, configuration, discovery and tag IO.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A pattern could not be compiled into a usable matcher.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The regex itself does not parse
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A named group does not correspond to any tag field
    #[error("pattern {pattern:?}: capture group {group:?} is not a known tag field")]
    UnknownField { pattern: String, group: String },

    #[error("empty pattern")]
    Empty,
}

/// Loading or resolving configuration failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A static `field=value` tag is malformed
    #[error("invalid tag assignment: {0}")]
    InvalidTag(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Discovering audio files failed.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Reading or writing tags of one file failed.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The format has no writable tag type
    #[error("no writable tag for {}", .0.display())]
    Unsupported(PathBuf),

    #[error(transparent)]
    Id3(#[from] id3::Error),

    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for tag IO.
pub type Result<T> = std::result::Result<T, TagError>;
