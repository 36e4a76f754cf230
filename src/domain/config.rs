use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

/// Whether rewritten files are written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite every changed file in place.
    #[default]
    Apply,
    /// Compute and report changes without touching any file.
    DryRun,
}

/// Options for a rewrite run.
///
/// The defaults describe a plain run: rewrite `docs/` in place, sequentially,
/// reporting progress every 200 files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The documentation root whose subdirectories are processed.
    root: PathBuf,

    /// Whether changes are written back.
    write_mode: WriteMode,

    /// How many files to process between progress notifications.
    progress_interval: NonZeroUsize,

    /// Whether files within a subdirectory are transformed concurrently.
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            write_mode: WriteMode::default(),
            progress_interval: default_progress_interval(),
            parallel: false,
        }
    }
}

/// The documentation root used when none is given.
pub const DEFAULT_ROOT: &str = "docs";

const fn default_progress_interval() -> NonZeroUsize {
    NonZeroUsize::new(200).expect("200 is non-zero")
}

impl Config {
    /// A default configuration rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// The documentation root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether changes are written back.
    #[must_use]
    pub const fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Sets whether changes are written back.
    #[must_use]
    pub const fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Whether this run leaves files untouched.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self.write_mode, WriteMode::DryRun)
    }

    /// Files processed between progress notifications.
    #[must_use]
    pub const fn progress_interval(&self) -> NonZeroUsize {
        self.progress_interval
    }

    /// Sets the progress notification interval.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: NonZeroUsize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Whether files within a subdirectory are transformed concurrently.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets whether files are transformed concurrently.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
