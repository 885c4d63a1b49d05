use std::path::PathBuf;

/// Failures that can occur while scanning or updating a library.
///
/// Only [`Error::InvalidDirectory`] ends a run; everything else is scoped to
/// the file named in the variant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a readable directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("failed to read tags from {}: {source}", path.display())]
    ContainerParse {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{} is not a FLAC stream", .0.display())]
    NotFlac(PathBuf),

    #[error("failed to write {}: {source}", path.display())]
    SidecarWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no metadata block after STREAMINFO", .0.display())]
    StreamInfoOnly(PathBuf),

    #[error("failed to save lyrics tag to {}: {source}", path.display())]
    EmbedWrite {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}
