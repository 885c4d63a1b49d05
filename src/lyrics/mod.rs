//! Lyrics lookup
//!
//! This module provides:
//! - LRCLIB API client
//! - The [`LyricsSource`] seam the per-file driver fetches through
//! - Selection of synced vs. plain lyrics from a response

pub mod lrclib;

pub use lrclib::{LrclibClient, LrclibResponse};

/// Lyrics text picked from a lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lyrics {
    pub text: String,
    /// `true` when `text` came from the synced (LRC) field.
    pub synced: bool,
}

/// Result of one lookup.
///
/// `NotFound` and `Failed` are reported identically to the user; the split
/// only exists for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Lyrics),
    NotFound,
    Failed(String),
}

/// Anything that can resolve `(artist, title)` to lyrics.
pub trait LyricsSource {
    async fn lookup(&self, artist: &str, title: &str) -> Lookup;
}

/// Pick the lyrics to store from a response: synced first, then plain.
/// Empty strings count as absent.
pub fn select_lyrics(response: &LrclibResponse) -> Option<Lyrics> {
    if let Some(synced) = &response.synced_lyrics
        && !synced.is_empty() {
            return Some(Lyrics {
                text: synced.clone(),
                synced: true,
            });
        }
    if let Some(plain) = &response.plain_lyrics
        && !plain.is_empty() {
            return Some(Lyrics {
                text: plain.clone(),
                synced: false,
            });
        }
    None
}
