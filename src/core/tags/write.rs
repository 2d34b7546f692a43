//! Write a `TagSet` to an audio file.

use std::path::Path;

use id3::frame::Comment;
use id3::{Tag, TagLike, Version};
use lofty::{ItemKey, TagExt, TaggedFileExt};
use tracing::debug;

use super::super::types::{TagField, TagSet, TagValue};
use super::is_mp3;
use super::util::{parse_slash_pair_u32, with_year};
use crate::error::{Result, TagError};

/// What to do with known fields that are absent from the `TagSet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Leave them as they are in the file.
    #[default]
    Merge,
    /// Remove them from the file.
    Replace,
}

/// Write `tags` to `path`.
///
/// Semantics:
/// - Fields present in `tags` are always written.
/// - Absent fields are kept (`Merge`) or removed (`Replace`).
/// - Tags nametag does not know about are never touched.
pub fn write_tags(path: &Path, tags: &TagSet, mode: WriteMode) -> Result<()> {
    if !path.exists() {
        return Err(TagError::FileNotFound(path.to_path_buf()));
    }

    if is_mp3(path) {
        write_id3(path, tags, mode)
    } else {
        write_lofty(path, tags, mode)
    }
}

/// Helper: set/remove a plain text frame (T***)
fn set_text_opt(tag: &mut Tag, id: &str, v: Option<&TagValue>, mode: WriteMode) {
    match v {
        Some(v) => tag.set_text(id, v.to_string()),
        None if mode == WriteMode::Replace => {
            let _ = tag.remove(id); // TagLike::remove returns Vec<Frame>; discard it
        }
        None => {}
    }
}

/// Helper: write TRCK/TPOS as "n" or "n/total" (or remove if None)
fn set_slash_pair(tag: &mut Tag, id: &str, n: Option<u32>, total: Option<u32>) {
    match n {
        None => {
            let _ = tag.remove(id);
        }
        Some(n) => match total {
            Some(t) => tag.set_text(id, format!("{}/{}", n, t)),
            None => tag.set_text(id, n.to_string()),
        },
    }
}

/// Resolve the (number, total) pair to write for TRCK/TPOS.
///
/// In merge mode a missing half is taken from the file.
fn slash_pair(
    tag: &Tag,
    id: &str,
    tags: &TagSet,
    fields: (TagField, TagField),
    mode: WriteMode,
) -> (Option<u32>, Option<u32>) {
    let wanted = (tags.number(fields.0), tags.number(fields.1));
    if mode == WriteMode::Replace {
        return wanted;
    }

    let existing = tag.get(id).and_then(|f| f.content().text());
    let (old_n, old_total) = parse_slash_pair_u32(existing);
    (wanted.0.or(old_n), wanted.1.or(old_total))
}

fn write_id3(path: &Path, tags: &TagSet, mode: WriteMode) -> Result<()> {
    // Load existing tag if there is one; otherwise start fresh.
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(e.into()),
    };

    set_text_opt(&mut tag, "TIT2", tags.get(TagField::Title), mode);
    set_text_opt(&mut tag, "TPE1", tags.get(TagField::Artist), mode);
    set_text_opt(&mut tag, "TALB", tags.get(TagField::Album), mode);
    set_text_opt(&mut tag, "TPE2", tags.get(TagField::AlbumArtist), mode);
    set_text_opt(&mut tag, "TCOM", tags.get(TagField::Composer), mode);
    set_text_opt(&mut tag, "TCON", tags.get(TagField::Genre), mode);

    let touches = |a, b| tags.contains(a) || tags.contains(b);
    if touches(TagField::Track, TagField::TrackTotal) || mode == WriteMode::Replace {
        let (n, total) = slash_pair(
            &tag,
            "TRCK",
            tags,
            (TagField::Track, TagField::TrackTotal),
            mode,
        );
        set_slash_pair(&mut tag, "TRCK", n, total);
    }
    if touches(TagField::Disc, TagField::DiscTotal) || mode == WriteMode::Replace {
        let (n, total) = slash_pair(
            &tag,
            "TPOS",
            tags,
            (TagField::Disc, TagField::DiscTotal),
            mode,
        );
        set_slash_pair(&mut tag, "TPOS", n, total);
    }

    // Date wins over year; both live in TDRC for v2.4.
    let date = match (tags.text(TagField::Date), tags.number(TagField::Year)) {
        (Some(date), _) => Some(date.to_string()),
        // merge: a lone year keeps the month/day already in the file
        (None, Some(year)) if mode == WriteMode::Merge => Some(
            tag.get("TDRC")
                .and_then(|f| f.content().text())
                .and_then(|d| with_year(d, year))
                .unwrap_or_else(|| year.to_string()),
        ),
        (None, Some(year)) => Some(year.to_string()),
        (None, None) => None,
    };
    match date {
        Some(date) => {
            let _ = tag.remove("TYER");
            tag.set_text("TDRC", date);
        }
        None if mode == WriteMode::Replace => {
            let _ = tag.remove("TYER");
            let _ = tag.remove("TDRC");
        }
        None => {}
    }

    // Comment (COMM): replace with a single "eng" comment
    match tags.text(TagField::Comment) {
        Some(s) => {
            let _ = tag.remove("COMM");
            let _ = tag.add_frame(Comment {
                lang: "eng".to_string(),
                description: "".to_string(),
                text: s.to_string(),
            });
        }
        None if mode == WriteMode::Replace => {
            let _ = tag.remove("COMM");
        }
        None => {}
    }

    // Write back to file (always v2.4)
    tag.write_to_path(path, Version::Id3v24)?;
    debug!(path = %path.display(), "wrote ID3v2.4 tag");

    Ok(())
}

fn item_key(field: TagField) -> ItemKey {
    match field {
        TagField::Title => ItemKey::TrackTitle,
        TagField::Artist => ItemKey::TrackArtist,
        TagField::Album => ItemKey::AlbumTitle,
        TagField::AlbumArtist => ItemKey::AlbumArtist,
        TagField::Track => ItemKey::TrackNumber,
        TagField::TrackTotal => ItemKey::TrackTotal,
        TagField::Disc => ItemKey::DiscNumber,
        TagField::DiscTotal => ItemKey::DiscTotal,
        TagField::Year => ItemKey::Year,
        TagField::Date => ItemKey::RecordingDate,
        TagField::Genre => ItemKey::Genre,
        TagField::Composer => ItemKey::Composer,
        TagField::Comment => ItemKey::Comment,
    }
}

fn write_lofty(path: &Path, tags: &TagSet, mode: WriteMode) -> Result<()> {
    let mut tagged_file = lofty::Probe::open(path)?.read()?;

    // Get or create the primary tag
    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(lofty::Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| TagError::Unsupported(path.to_path_buf()))?;

    for field in TagField::ALL {
        let key = item_key(field);
        match tags.get(field) {
            Some(value) => {
                if !tag.insert_text(key.clone(), value.to_string()) {
                    debug!(field = %field, ?tag_type, "field not supported by tag type");
                }
            }
            None if mode == WriteMode::Replace => tag.remove_key(&key),
            None => {}
        }
    }

    tag.save_to_path(path)?;
    debug!(path = %path.display(), ?tag_type, "wrote tag");

    Ok(())
}
