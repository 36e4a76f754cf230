use std::{io, path::PathBuf};

/// Errors that abort a rewrite run.
#[derive(Debug, thiserror::Error)]
pub enum RelinkError {
    /// The documentation root does not exist.
    #[error("documentation root '{}' does not exist", .0.display())]
    MissingRoot(PathBuf),

    /// The documentation root exists but is not a directory.
    #[error("documentation root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A directory could not be listed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// A file or directory could not be read.
    #[error("failed to read '{}'", path.display())]
    Read {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A rewritten file could not be written back.
    #[error("failed to write '{}'", path.display())]
    Write {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
