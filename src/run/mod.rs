//! Per-file driver: tag check, lookup, confirmation, write.

use crate::error::Error;
use crate::lyrics::{Lookup, LyricsSource};
use crate::prompt::{Answer, Prompt};
use crate::report::LogTarget;
use crate::scan;
use crate::tags::AudioFile;
use crate::writer;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Immutable settings for one invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub directory: PathBuf,
    pub force: bool,
    pub prompt: bool,
    pub dry_run: bool,
    pub log_target: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    SkippedExisting,
    SkippedPrompt,
    NotFound,
    MissingTags,
    DryRun,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Updated => "updated",
            Outcome::SkippedExisting => "skipped_existing",
            Outcome::SkippedPrompt => "skipped_prompt",
            Outcome::NotFound => "not_found",
            Outcome::MissingTags => "missing_tags",
            Outcome::DryRun => "dry_run",
            Outcome::Error => "error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    /// `<path>: <outcome>`
    pub fn line(&self) -> String {
        format!("{}: {}", self.path.display(), self.outcome)
    }
}

/// Owns everything that lives for the whole run, including the sticky
/// "yes to all" answer.
pub struct Runner<S, R, W> {
    config: RunConfig,
    source: S,
    prompt: Prompt<R, W>,
    yes_to_all: bool,
}

impl<S: LyricsSource, R: BufRead, W: Write> Runner<S, R, W> {
    pub fn new(config: RunConfig, source: S, prompt: Prompt<R, W>) -> Self {
        Self {
            config,
            source,
            prompt,
            yes_to_all: false,
        }
    }

    /// Process every FLAC file under the configured directory, printing a
    /// progress line per file. Only an unusable root directory is an error.
    pub async fn run(&mut self) -> Result<Vec<FileReport>, Error> {
        let files = scan::flac_files(&self.config.directory)?;
        let mut reports = Vec::new();

        for path in files {
            println!("Processing: {}", path.display());
            let outcome = self.process_file(&path).await;
            println!("  -> {outcome}");
            reports.push(FileReport { path, outcome });
        }

        Ok(reports)
    }

    pub async fn process_file(&mut self, path: &Path) -> Outcome {
        let file = match AudioFile::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "cannot read tags");
                return Outcome::Error;
            }
        };

        let Some((artist, title)) = file.artist_and_title() else {
            debug!(path = %file.path.display(), "artist or title missing");
            return Outcome::MissingTags;
        };

        // Prompt mode defers this decision to the question and to the
        // per-target checks in the writer.
        if file.has_existing_lyrics() && !self.config.force && !self.config.prompt {
            return Outcome::SkippedExisting;
        }

        let lyrics = match self.source.lookup(artist, title).await {
            Lookup::Found(lyrics) => lyrics,
            Lookup::NotFound => return Outcome::NotFound,
            Lookup::Failed(reason) => {
                debug!(artist, title, %reason, "lookup failed, treating as not found");
                return Outcome::NotFound;
            }
        };
        debug!(artist, title, synced = lyrics.synced, "lyrics found");

        if self.config.prompt && !self.yes_to_all {
            match self.prompt.ask(artist, title) {
                Ok(Answer::Yes) => {}
                Ok(Answer::All) => self.yes_to_all = true,
                Ok(Answer::No) => return Outcome::SkippedPrompt,
                Err(e) => {
                    warn!(error = %e, "prompt failed, skipping file");
                    return Outcome::SkippedPrompt;
                }
            }
        }

        if self.config.dry_run {
            return Outcome::DryRun;
        }

        let written = writer::write_lyrics(path, &lyrics.text, self.config.force);
        debug!(sidecar = written.sidecar, embedded = written.embedded, "write finished");
        if written.any() {
            Outcome::Updated
        } else {
            Outcome::SkippedExisting
        }
    }
}
