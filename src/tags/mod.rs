//! FLAC tag access through `lofty`.
//!
//! Reads `ARTIST`/`TITLE`/`LYRICS` from the Vorbis comment block and writes
//! `LYRICS` back.

use crate::error::Error;
use crate::writer::sidecar_path;
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{FileType, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt, TagType};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// What we know about one FLAC file before fetching.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub path: PathBuf,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub has_embedded_lyrics: bool,
    pub has_sidecar_lyrics: bool,
}

impl AudioFile {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let tagged = open_flac(path)?;
        let tag = tagged.tag(TagType::VorbisComments);

        let artist = tag.and_then(|t| t.artist()).map(|s| s.into_owned());
        let title = tag.and_then(|t| t.title()).map(|s| s.into_owned());

        Ok(Self {
            path: path.to_path_buf(),
            artist: artist.filter(|s| !s.is_empty()),
            title: title.filter(|s| !s.is_empty()),
            has_embedded_lyrics: tag.is_some_and(has_lyrics),
            has_sidecar_lyrics: sidecar_path(path).exists(),
        })
    }

    /// Both lookup keys, or `None` if either is missing.
    pub fn artist_and_title(&self) -> Option<(&str, &str)> {
        match (&self.artist, &self.title) {
            (Some(artist), Some(title)) => Some((artist, title)),
            _ => None,
        }
    }

    pub fn has_existing_lyrics(&self) -> bool {
        self.has_embedded_lyrics || self.has_sidecar_lyrics
    }
}

/// Store `lyrics` in the file's `LYRICS` comment.
///
/// Returns `Ok(false)` without touching the file when a non-empty value is
/// already there and `force` is off. Streams whose only metadata block is
/// STREAMINFO are refused with [`Error::StreamInfoOnly`].
pub fn embed_lyrics(path: &Path, lyrics: &str, force: bool) -> Result<bool, Error> {
    let mut tagged = open_flac(path)?;
    if streaminfo_is_last_block(path) {
        return Err(Error::StreamInfoOnly(path.to_path_buf()));
    }

    let tag = match tagged.tag_mut(TagType::VorbisComments) {
        Some(t) => t,
        None => {
            tagged.insert_tag(Tag::new(TagType::VorbisComments));
            tagged
                .tag_mut(TagType::VorbisComments)
                .ok_or_else(|| Error::NotFlac(path.to_path_buf()))?
        }
    };

    if has_lyrics(tag) && !force {
        return Ok(false);
    }

    tag.insert_text(ItemKey::Lyrics, lyrics.to_string());
    tag.save_to_path(path, WriteOptions::default())
        .map_err(|source| Error::EmbedWrite {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(true)
}

// Audio properties are never needed; cover art is still read so that a
// rewrite keeps existing pictures.
fn parse_options() -> ParseOptions {
    ParseOptions::new().read_properties(false)
}

fn open_flac(path: &Path) -> Result<TaggedFile, Error> {
    let tagged = Probe::open(path)
        .and_then(|probe| probe.options(parse_options()).read())
        .map_err(|source| Error::ContainerParse {
            path: path.to_path_buf(),
            source,
        })?;

    if tagged.file_type() != FileType::Flac {
        return Err(Error::NotFlac(path.to_path_buf()));
    }
    Ok(tagged)
}

// lofty cannot add a block behind a STREAMINFO that carries the last-block
// flag. Only checked for streams that start with the native magic; a leading
// ID3v2 tag means other blocks follow anyway.
fn streaminfo_is_last_block(path: &Path) -> bool {
    let mut header = [0u8; 5];
    let read = File::open(path).and_then(|mut f| f.read_exact(&mut header));
    read.is_ok() && &header[..4] == b"fLaC" && header[4] & 0x80 != 0
}

fn has_lyrics(tag: &Tag) -> bool {
    tag.get_string(&ItemKey::Lyrics)
        .is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The magic plus STREAMINFO, with `last` setting its last-block flag.
    fn streaminfo(last: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"fLaC");
        // [last-block flag |] STREAMINFO, 34-byte body
        let flag = if last { 0x80 } else { 0x00 };
        bytes.extend_from_slice(&[flag, 0x00, 0x00, 0x22]);
        bytes.extend_from_slice(&4096u16.to_be_bytes()); // min block size
        bytes.extend_from_slice(&4096u16.to_be_bytes()); // max block size
        bytes.extend_from_slice(&[0u8; 3]); // min frame size
        bytes.extend_from_slice(&[0u8; 3]); // max frame size
        // 44.1 kHz, stereo, 16-bit, zero samples
        let packed: u64 = (44_100u64 << 44) | (1u64 << 41) | (15u64 << 36);
        bytes.extend_from_slice(&packed.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 16]); // MD5
        bytes
    }

    /// STREAMINFO followed by a final 16-byte PADDING block, the minimum
    /// lofty can rewrite.
    fn bare_flac() -> Vec<u8> {
        let mut bytes = streaminfo(false);
        bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x10]);
        bytes.extend_from_slice(&[0u8; 16]);
        bytes
    }

    pub fn write_streaminfo_only(path: &Path) {
        std::fs::write(path, streaminfo(true)).unwrap();
    }

    pub fn write_flac(path: &Path, artist: Option<&str>, title: Option<&str>, lyrics: Option<&str>) {
        std::fs::write(path, bare_flac()).unwrap();
        if artist.is_none() && title.is_none() && lyrics.is_none() {
            return;
        }

        let mut tag = Tag::new(TagType::VorbisComments);
        if let Some(a) = artist {
            tag.set_artist(a.to_string());
        }
        if let Some(t) = title {
            tag.set_title(t.to_string());
        }
        if let Some(l) = lyrics {
            tag.insert_text(ItemKey::Lyrics, l.to_string());
        }
        tag.save_to_path(path, WriteOptions::default()).unwrap();
    }

    pub fn embedded_lyrics(path: &Path) -> Option<String> {
        let tagged = open_flac(path).unwrap();
        tagged
            .tag(TagType::VorbisComments)
            .and_then(|t| t.get_string(&ItemKey::Lyrics))
            .map(str::to_string)
    }
}
