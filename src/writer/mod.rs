//! Lyrics writer: `.lrc` sidecar plus embedded `LYRICS` tag.

use crate::error::Error;
use crate::tags;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SIDECAR_EXTENSION: &str = "lrc";

/// `Music/song.flac` -> `Music/song.lrc`
pub fn sidecar_path(audio: &Path) -> PathBuf {
    audio.with_extension(SIDECAR_EXTENSION)
}

/// Write `lyrics` as the sidecar's entire content.
///
/// Returns `Ok(false)` if a sidecar already exists and `force` is off.
pub fn write_sidecar(audio: &Path, lyrics: &str, force: bool) -> Result<bool, Error> {
    let path = sidecar_path(audio);
    if path.exists() && !force {
        return Ok(false);
    }
    std::fs::write(&path, lyrics).map_err(|source| Error::SidecarWrite { path, source })?;
    Ok(true)
}

/// Which targets actually received the lyrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub sidecar: bool,
    pub embedded: bool,
}

impl WriteReport {
    pub fn any(&self) -> bool {
        self.sidecar || self.embedded
    }
}

/// Attempt both targets. A failure on one is logged and counted as "not
/// written"; it never stops the other.
pub fn write_lyrics(audio: &Path, lyrics: &str, force: bool) -> WriteReport {
    let sidecar = write_sidecar(audio, lyrics, force).unwrap_or_else(|e| {
        warn!(error = %e, "sidecar not written");
        false
    });
    let embedded = tags::embed_lyrics(audio, lyrics, force).unwrap_or_else(|e| {
        warn!(error = %e, "lyrics tag not written");
        false
    });
    WriteReport { sidecar, embedded }
}
