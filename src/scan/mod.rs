//! Library walker

use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const FLAC_EXTENSION: &str = "flac";

/// Check if a file has the FLAC extension (any case)
pub fn is_flac(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FLAC_EXTENSION))
}

/// Lazily walk `root` for FLAC files at any depth.
///
/// Fails up front if `root` is not a directory we can list. Unreadable
/// entries below it are skipped. Entries within a directory come out sorted
/// by file name so runs over the same tree print in the same order.
pub fn flac_files(root: &Path) -> Result<impl Iterator<Item = PathBuf> + use<>, Error> {
    if !root.is_dir() || std::fs::read_dir(root).is_err() {
        return Err(Error::InvalidDirectory(root.to_path_buf()));
    }
    let root =
        std::path::absolute(root).map_err(|_| Error::InvalidDirectory(root.to_path_buf()))?;

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        // `path().is_file()` follows symlinks to files.
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_flac(p));

    Ok(files)
}
