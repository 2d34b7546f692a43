//! core/tags/mod.rs
//!
//! Tag read/write, dispatched by file format.
//! - MP3 goes through the `id3` crate (ID3v2.4 frames).
//! - Everything else goes through `lofty` (Vorbis comments, MP4 atoms, APE, RIFF INFO).
//!
//! Public API:
//! - [`read_tags`] reads the fields nametag knows about into a [`TagSet`].
//! - [`write_tags`] writes a [`TagSet`] back to disk.
//!
//! [`TagSet`]: super::types::TagSet

mod read;
pub(crate) mod util;
mod write;

use std::path::Path;

pub use read::read_tags;
pub use write::{WriteMode, write_tags};

/// True when the file should go through the ID3 path.
pub(crate) fn is_mp3(path: &Path) -> bool {
    super::library::has_extension(path, "mp3")
}
