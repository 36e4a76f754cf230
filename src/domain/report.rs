use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use serde::Serialize;

/// Outcome of rewriting a single markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The file name within its subdirectory.
    pub name: String,
    /// Links rewritten plus placeholder substitutions applied.
    pub changes: usize,
}

impl FileReport {
    /// Whether the file was (or, in a dry run, would be) written.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changes > 0
    }
}

/// Running counters, kept per subdirectory and for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Markdown files read.
    pub files_processed: usize,
    /// Markdown files with at least one change.
    pub files_changed: usize,
    /// Total changes across all files.
    pub links_changed: usize,
}

impl Totals {
    const fn record(&mut self, file: &FileReport) {
        self.files_processed += 1;
        if file.is_changed() {
            self.files_changed += 1;
        }
        self.links_changed += file.changes;
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.files_processed += rhs.files_processed;
        self.files_changed += rhs.files_changed;
        self.links_changed += rhs.links_changed;
    }
}

/// Outcome of processing one subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdirectoryReport {
    path: PathBuf,
    files: Vec<FileReport>,
    #[serde(flatten)]
    totals: Totals,
}

impl SubdirectoryReport {
    /// An empty report for the subdirectory at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            files: Vec::new(),
            totals: Totals::default(),
        }
    }

    /// Records a processed file.
    pub fn record(&mut self, file: FileReport) {
        self.totals.record(&file);
        self.files.push(file);
    }

    /// The subdirectory this report covers.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-file outcomes, in processing order.
    #[must_use]
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Counters for this subdirectory.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }
}

/// Outcome of a whole run over a documentation root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    root: PathBuf,
    dry_run: bool,
    subdirectories: Vec<SubdirectoryReport>,
    totals: Totals,
}

impl RunReport {
    /// An empty report for the documentation root at `root`.
    #[must_use]
    pub fn new(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            subdirectories: Vec::new(),
            totals: Totals::default(),
        }
    }

    /// Adds a finished subdirectory to the aggregate.
    pub fn push(&mut self, subdirectory: SubdirectoryReport) {
        self.totals += subdirectory.totals();
        self.subdirectories.push(subdirectory);
    }

    /// Whether nothing was written to disk.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Reports for each processed subdirectory, in processing order.
    #[must_use]
    pub fn subdirectories(&self) -> &[SubdirectoryReport] {
        &self.subdirectories
    }

    /// Aggregate counters across all subdirectories.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    /// Whether any file was (or would be) changed.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.totals.files_changed > 0
    }
}
