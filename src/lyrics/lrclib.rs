//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs

use super::{Lookup, LyricsSource, select_lyrics};
use crate::config::LyricsConfig;
use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

/// LRCLIB `/get` response. Only the lyric fields are kept.
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibResponse {
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(cfg: &LyricsConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_url(&self, artist_name: &str, track_name: &str) -> String {
        format!(
            "{}/get?artist_name={}&track_name={}",
            self.base_url,
            urlencoding::encode(artist_name),
            urlencoding::encode(track_name)
        )
    }

    /// Get lyrics with exact match. `Ok(None)` when LRCLIB has no record.
    pub async fn get(
        &self,
        artist_name: &str,
        track_name: &str,
    ) -> anyhow::Result<Option<LrclibResponse>> {
        let url = self.get_url(artist_name, track_name);
        let response = self.client.get(&url).send().await.context("send lrclib request")?;

        if response.status().is_success() {
            let lyrics: LrclibResponse = response.json().await.context("parse lrclib json")?;
            Ok(Some(lyrics))
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            anyhow::bail!("LRCLIB API error: {}", response.status());
        }
    }
}

impl LyricsSource for LrclibClient {
    async fn lookup(&self, artist: &str, title: &str) -> Lookup {
        match self.get(artist, title).await {
            Ok(Some(response)) => match select_lyrics(&response) {
                Some(lyrics) => Lookup::Found(lyrics),
                None => Lookup::NotFound,
            },
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                debug!(artist, title, error = %format!("{e:#}"), "lrclib lookup failed");
                Lookup::Failed(format!("{e:#}"))
            }
        }
    }
}
