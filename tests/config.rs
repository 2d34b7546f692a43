use std::fs;

use tempfile::TempDir;

use nametag::config::apply_tag_assignment;
use nametag::{Config, ConfigError, MatchResult, PatternError, TagField, TagSet, TagValue};

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("nametag.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_patterns_tags_and_options() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
underscores = true
extensions = ["mp3"]

[[pattern]]
name = "live"
regex = '^(?P<artist>.+) live at (?P<album>.+)\.mp3$'

[[pattern]]
regex = '^(?P<title>.+)\.mp3$'

[tags]
genre = "Jazz"
disc = "1/2"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert!(config.underscores);
    assert!(!config.ignore_case);
    assert!(config.builtin);
    assert_eq!(config.extensions, vec!["mp3".to_string()]);
    assert_eq!(config.patterns.len(), 2);
    assert_eq!(config.patterns[0].name.as_deref(), Some("live"));

    let tags = config.static_tags().unwrap();
    assert_eq!(tags.text(TagField::Genre), Some("Jazz"));
    assert_eq!(tags.number(TagField::Disc), Some(1));
    assert_eq!(tags.number(TagField::DiscTotal), Some(2));
}

#[test]
fn custom_patterns_come_before_builtins() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[pattern]]
name = "whole name"
regex = '^(?P<title>[^/]+)\.mp3$'
"#,
    );

    let config = Config::load(&path).unwrap();
    let patterns = config.pattern_set().unwrap();
    assert!(patterns.len() > 1);
    assert_eq!(patterns.iter().next().and_then(|p| p.name()), Some("whole name"));

    match patterns.match_path("Artist - Title.mp3") {
        MatchResult::Matched { pattern, label, tags } => {
            assert_eq!(pattern, 0);
            assert_eq!(label, "whole name");
            assert_eq!(tags.text(TagField::Title), Some("Artist - Title"));
        }
        MatchResult::NoMatch => panic!("expected a match"),
    }
}

#[test]
fn builtins_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
builtin = false

[[pattern]]
regex = '^(?P<title>.+)\.flac$'
"#,
    );

    let patterns = Config::load(&path).unwrap().pattern_set().unwrap();
    assert_eq!(patterns.len(), 1);
    assert!(!patterns.match_path("Artist - Title.mp3").is_match());
}

#[test]
fn default_config_uses_builtins_only() {
    let config = Config::default();
    let patterns = config.pattern_set().unwrap();
    assert!(!patterns.is_empty());
    assert!(config.static_tags().unwrap().is_empty());
    assert!(config.extensions.iter().any(|e| e == "flac"));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "underscore = true\n");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn bad_pattern_surfaces_at_compile() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[pattern]]
regex = '^(?P<mood>.+)\.mp3$'
"#,
    );

    let config = Config::load(&path).unwrap();
    let err = config.pattern_set().unwrap_err();
    assert!(matches!(err, PatternError::UnknownField { .. }));
}

#[test]
fn unknown_static_tag_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tags]\nmood = \"mellow\"\n");

    let err = Config::load(&path).unwrap().static_tags().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTag(_)));
}

#[test]
fn tag_assignments() {
    let mut tags = TagSet::new();
    apply_tag_assignment(&mut tags, "genre=Post Rock").unwrap();
    apply_tag_assignment(&mut tags, "track=3/12").unwrap();
    apply_tag_assignment(&mut tags, "year=1999").unwrap();

    assert_eq!(tags.text(TagField::Genre), Some("Post Rock"));
    assert_eq!(tags.number(TagField::Track), Some(3));
    assert_eq!(tags.number(TagField::TrackTotal), Some(12));
    assert_eq!(tags.get(TagField::Year), Some(&TagValue::Number(1999)));

    assert!(apply_tag_assignment(&mut tags, "genre").is_err());
    assert!(apply_tag_assignment(&mut tags, "track=three").is_err());
}
