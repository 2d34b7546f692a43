//! core/tags/read.rs
//! Read the existing tags of a file into a `TagSet`.
//!
//! Only the fields nametag can write are read; everything else in the file is
//! left alone and never shows up here.

use std::path::Path;

use id3::frame::Content;
use id3::{Tag, TagLike};
use lofty::{ItemKey, TaggedFileExt};

use super::super::types::{TagField, TagSet, TagValue};
use super::is_mp3;
use super::util::{parse_slash_pair_u32, parse_year};
use crate::error::{Result, TagError};

/// Read the current tags of `path`.
///
/// A file without any tag yields an empty `TagSet`, not an error.
pub fn read_tags(path: &Path) -> Result<TagSet> {
    if !path.exists() {
        return Err(TagError::FileNotFound(path.to_path_buf()));
    }

    if is_mp3(path) {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(tagset_from_id3(&tag)),
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Ok(TagSet::new()),
            Err(e) => Err(e.into()),
        }
    } else {
        let tagged_file = lofty::Probe::open(path)?.read()?;
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());
        Ok(tag.map(tagset_from_lofty).unwrap_or_default())
    }
}

fn tagset_from_id3(tag: &Tag) -> TagSet {
    let mut out = TagSet::new();

    set_text(&mut out, TagField::Title, text_frame(tag, "TIT2"));
    set_text(&mut out, TagField::Artist, text_frame(tag, "TPE1"));
    set_text(&mut out, TagField::Album, text_frame(tag, "TALB"));
    set_text(&mut out, TagField::AlbumArtist, text_frame(tag, "TPE2"));
    set_text(&mut out, TagField::Genre, text_frame(tag, "TCON"));
    set_text(&mut out, TagField::Composer, text_frame(tag, "TCOM"));
    set_text(&mut out, TagField::Comment, first_comment(tag));

    let (track, track_total) = parse_slash_pair_u32(text_frame(tag, "TRCK").as_deref());
    let (disc, disc_total) = parse_slash_pair_u32(text_frame(tag, "TPOS").as_deref());
    set_number(&mut out, TagField::Track, track);
    set_number(&mut out, TagField::TrackTotal, track_total);
    set_number(&mut out, TagField::Disc, disc);
    set_number(&mut out, TagField::DiscTotal, disc_total);

    // TDRC (v2.4) or TYER (v2.3)
    let date = text_frame(tag, "TDRC").or_else(|| text_frame(tag, "TYER"));
    set_date(&mut out, date);

    out
}

fn tagset_from_lofty(tag: &lofty::Tag) -> TagSet {
    let mut out = TagSet::new();
    let text = |key: &ItemKey| tag.get_string(key).map(str::to_owned);

    set_text(&mut out, TagField::Title, text(&ItemKey::TrackTitle));
    set_text(&mut out, TagField::Artist, text(&ItemKey::TrackArtist));
    set_text(&mut out, TagField::Album, text(&ItemKey::AlbumTitle));
    set_text(&mut out, TagField::AlbumArtist, text(&ItemKey::AlbumArtist));
    set_text(&mut out, TagField::Genre, text(&ItemKey::Genre));
    set_text(&mut out, TagField::Composer, text(&ItemKey::Composer));
    set_text(&mut out, TagField::Comment, text(&ItemKey::Comment));

    // Some formats store "n/total" in the number item itself.
    let (track, track_total) = parse_slash_pair_u32(text(&ItemKey::TrackNumber).as_deref());
    let (disc, disc_total) = parse_slash_pair_u32(text(&ItemKey::DiscNumber).as_deref());
    let number = |key: &ItemKey| parse_slash_pair_u32(text(key).as_deref()).0;
    set_number(&mut out, TagField::Track, track);
    set_number(
        &mut out,
        TagField::TrackTotal,
        number(&ItemKey::TrackTotal).or(track_total),
    );
    set_number(&mut out, TagField::Disc, disc);
    set_number(
        &mut out,
        TagField::DiscTotal,
        number(&ItemKey::DiscTotal).or(disc_total),
    );

    let date = text(&ItemKey::RecordingDate);
    let year = text(&ItemKey::Year);
    match (date, year) {
        (Some(date), year) => {
            set_date(&mut out, Some(date));
            if let Some(y) = year.as_deref().and_then(parse_year) {
                out.insert(TagField::Year, TagValue::Number(y));
            }
        }
        (None, year) => set_date(&mut out, year),
    }

    out
}

fn set_text(out: &mut TagSet, field: TagField, value: Option<String>) {
    if let Some(v) = value.map(|s| s.trim().to_string()) {
        if !v.is_empty() {
            out.insert(field, TagValue::Text(v));
        }
    }
}

fn set_number(out: &mut TagSet, field: TagField, value: Option<u32>) {
    if let Some(n) = value {
        out.insert(field, TagValue::Number(n));
    }
}

/// A bare year is only `year`; a fuller date is `date` plus the derived `year`.
fn set_date(out: &mut TagSet, value: Option<String>) {
    let Some(value) = value.map(|s| s.trim().to_string()) else {
        return;
    };
    if value.is_empty() {
        return;
    }
    if let Some(year) = parse_year(&value) {
        out.insert(TagField::Year, TagValue::Number(year));
        if value.len() == 4 {
            return;
        }
    }
    out.insert(TagField::Date, TagValue::Text(value));
}

/// Get a best-effort string value from a frame id.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

fn first_comment(tag: &Tag) -> Option<String> {
    tag.comments().next().map(|c| c.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let err = read_tags(Path::new("/nonexistent/file.mp3")).unwrap_err();
        assert!(matches!(err, TagError::FileNotFound(_)));
    }

    #[test]
    fn id3_frames_map_to_fields() {
        let mut tag = Tag::new();
        tag.set_text("TIT2", "Song");
        tag.set_text("TPE1", "Artist");
        tag.set_text("TRCK", "3/12");
        tag.set_text("TDRC", "1999-04-01");

        let tags = tagset_from_id3(&tag);
        assert_eq!(tags.text(TagField::Title), Some("Song"));
        assert_eq!(tags.text(TagField::Artist), Some("Artist"));
        assert_eq!(tags.number(TagField::Track), Some(3));
        assert_eq!(tags.number(TagField::TrackTotal), Some(12));
        assert_eq!(tags.number(TagField::Year), Some(1999));
        assert_eq!(tags.text(TagField::Date), Some("1999-04-01"));
    }

    #[test]
    fn bare_year_is_not_a_date() {
        let mut tag = Tag::new();
        tag.set_text("TDRC", "2001");

        let tags = tagset_from_id3(&tag);
        assert_eq!(tags.number(TagField::Year), Some(2001));
        assert!(!tags.contains(TagField::Date));
    }

    #[test]
    fn lofty_items_map_to_fields() {
        let mut tag = lofty::Tag::new(lofty::TagType::VorbisComments);
        tag.insert_text(ItemKey::TrackTitle, "Song".to_string());
        tag.insert_text(ItemKey::TrackNumber, "5".to_string());
        tag.insert_text(ItemKey::TrackTotal, "9".to_string());

        let tags = tagset_from_lofty(&tag);
        assert_eq!(tags.text(TagField::Title), Some("Song"));
        assert_eq!(tags.number(TagField::Track), Some(5));
        assert_eq!(tags.number(TagField::TrackTotal), Some(9));
    }
}
