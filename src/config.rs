//! Configuration: naming patterns, static tags and matching options.
//!
//! Loaded from an optional TOML file; CLI flags are layered on top by the
//! binary before [`Config::pattern_set`] is called.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::library::DEFAULT_EXTENSIONS;
use crate::core::pattern::normalize::{Normalized, normalize_value};
use crate::core::pattern::{MatchOptions, Pattern, PatternSet};
use crate::core::types::{TagField, TagSet, TagValue};
use crate::error::{ConfigError, PatternError};

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Treat `_` as a space in text captures
    pub underscores: bool,

    /// Compile patterns case-insensitively
    pub ignore_case: bool,

    /// Try the built-in patterns after the custom ones
    pub builtin: bool,

    /// Extensions picked up when walking directories
    pub extensions: Vec<String>,

    /// Custom patterns, highest priority first
    #[serde(rename = "pattern")]
    pub patterns: Vec<PatternConfig>,

    /// Static tags applied to every matched file
    pub tags: BTreeMap<String, String>,
}

/// One `[[pattern]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub regex: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            underscores: false,
            ignore_case: false,
            builtin: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
            tags: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            underscores: self.underscores,
            ignore_case: self.ignore_case,
        }
    }

    /// Compile the effective pattern set: custom patterns in order, then
    /// the built-ins when enabled.
    pub fn pattern_set(&self) -> Result<PatternSet, PatternError> {
        let options = self.match_options();

        let mut set = PatternSet::default();
        for p in &self.patterns {
            let pattern = match &p.name {
                Some(name) => Pattern::named(name, &p.regex, options)?,
                None => Pattern::new(&p.regex, options)?,
            };
            set.push(pattern);
        }
        if self.builtin {
            set.extend(PatternSet::builtin(options)?);
        }

        Ok(set)
    }

    /// Resolve the `[tags]` table into a `TagSet`.
    pub fn static_tags(&self) -> Result<TagSet, ConfigError> {
        let mut out = TagSet::new();
        for (key, value) in &self.tags {
            insert_tag(&mut out, key, value)?;
        }
        Ok(out)
    }
}

/// Apply a `field=value` assignment (as given to `--set`) to `tags`.
pub fn apply_tag_assignment(tags: &mut TagSet, s: &str) -> Result<(), ConfigError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidTag(format!("{s:?} is not field=value")))?;
    insert_tag(tags, key.trim(), value)
}

fn insert_tag(tags: &mut TagSet, key: &str, value: &str) -> Result<(), ConfigError> {
    let field = TagField::from_name(key)
        .ok_or_else(|| ConfigError::InvalidTag(format!("unknown tag field {key:?}")))?;

    match normalize_value(field, value, false) {
        Normalized::Value(v) => {
            tags.insert(field, v);
        }
        Normalized::WithTotal(n, total) => {
            tags.insert(field, TagValue::Number(n));
            if let Some(total_field) = field.total_field() {
                tags.insert(total_field, TagValue::Number(total));
            }
        }
        Normalized::Skip => {
            return Err(ConfigError::InvalidTag(format!("empty value for {field}")));
        }
        Normalized::Invalid => {
            return Err(ConfigError::InvalidTag(format!(
                "{field} needs a number, got {value:?}"
            )));
        }
    }
    Ok(())
}
