//! A documentation tree on disk
//!
//! The [`DocsTree`] is a root directory whose immediate subdirectories are
//! independent namespaces of markdown pages. Each subdirectory is processed on
//! its own with [`rewrite_subdirectory`]; files directly inside the root are
//! not touched.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;
use walkdir::WalkDir;

use super::{DirectoryNamespace, RelinkError, namespace::listed};
use crate::domain::{Config, FileReport, Rewrite, RunReport, SubdirectoryReport, WriteMode};

/// Receives notifications as a run makes progress.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// A subdirectory has been listed and is about to be processed.
    fn subdirectory_started(&mut self, _namespace: &DirectoryNamespace) {}

    /// A file has been processed.
    fn file_finished(&mut self, _file: &FileReport) {}

    /// The `processed`-th file of `path` is about to be reported, and
    /// `processed` is a multiple of the progress interval.
    fn checkpoint(&mut self, _path: &Path, _processed: usize) {}

    /// All files of a subdirectory have been processed.
    fn subdirectory_finished(&mut self, _report: &SubdirectoryReport) {}
}

impl Progress for () {}

/// A documentation root on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsTree {
    root: PathBuf,
}

impl DocsTree {
    /// Opens the documentation root at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RelinkError> {
        let root = root.into();
        match fs::metadata(&root) {
            Ok(metadata) if metadata.is_dir() => Ok(Self { root }),
            Ok(_) => Err(RelinkError::NotADirectory(root)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(RelinkError::MissingRoot(root)),
            Err(source) => Err(RelinkError::Read { path: root, source }),
        }
    }

    /// The documentation root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The immediate subdirectories of the root, sorted by name.
    ///
    /// Dangling symlinks in the root are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be listed.
    pub fn subdirectories(&self) -> Result<Vec<PathBuf>, RelinkError> {
        let mut subdirectories = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let Some(entry) = listed(entry)? else {
                continue;
            };
            if entry.file_type().is_dir() {
                subdirectories.push(entry.into_path());
            }
        }
        Ok(subdirectories)
    }

    /// Rewrites every subdirectory of the root in turn.
    ///
    /// # Errors
    ///
    /// Stops at the first directory that cannot be listed or file that cannot
    /// be read or written. Files already rewritten stay rewritten; running
    /// again is safe.
    pub fn rewrite(
        &self,
        config: &Config,
        progress: &mut impl Progress,
    ) -> Result<RunReport, RelinkError> {
        let mut report = RunReport::new(self.root.clone(), config.is_dry_run());
        for subdirectory in self.subdirectories()? {
            report.push(rewrite_subdirectory(subdirectory, config, progress)?);
        }
        Ok(report)
    }
}

/// Rewrites the broken links of every markdown file in one subdirectory.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed, or if any file in it
/// cannot be read or written.
#[instrument(level = "debug", skip(path, config, progress), fields(path = %path.display()))]
pub fn rewrite_subdirectory(
    path: PathBuf,
    config: &Config,
    progress: &mut impl Progress,
) -> Result<SubdirectoryReport, RelinkError> {
    let namespace = DirectoryNamespace::load(path)?;
    progress.subdirectory_started(&namespace);
    if namespace.is_empty() {
        tracing::debug!("No markdown files in {}", namespace.path().display());
    }

    let mut report = SubdirectoryReport::new(namespace.path().to_path_buf());
    let write_mode = config.write_mode();

    if config.parallel() {
        let names: Vec<&str> = namespace.names().collect();
        let files = names
            .par_iter()
            .map(|name| rewrite_file(&namespace, name, write_mode))
            .collect::<Result<Vec<_>, _>>()?;
        for file in files {
            record(&mut report, file, config, progress);
        }
    } else {
        for name in namespace.names() {
            let file = rewrite_file(&namespace, name, write_mode)?;
            record(&mut report, file, config, progress);
        }
    }

    progress.subdirectory_finished(&report);
    Ok(report)
}

fn record(
    report: &mut SubdirectoryReport,
    file: FileReport,
    config: &Config,
    progress: &mut impl Progress,
) {
    let processed = report.totals().files_processed + 1;
    if processed % config.progress_interval().get() == 0 {
        progress.checkpoint(report.path(), processed);
    }

    progress.file_finished(&file);
    report.record(file);
}

/// Rewrites the broken links of the file called `name` in `namespace`.
///
/// The file is only written if something changed and `write_mode` allows it.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text, or cannot be
/// written back.
#[instrument(level = "trace", skip(namespace), fields(dir = %namespace.path().display()))]
pub fn rewrite_file(
    namespace: &DirectoryNamespace,
    name: &str,
    write_mode: WriteMode,
) -> Result<FileReport, RelinkError> {
    let path = namespace.file_path(name);
    let text = fs::read_to_string(&path).map_err(|source| RelinkError::Read {
        path: path.clone(),
        source,
    })?;

    let rewrite = Rewrite::apply(&text, |target| namespace.contains(target));

    if rewrite.is_changed() && write_mode == WriteMode::Apply {
        fs::write(&path, rewrite.text()).map_err(|source| RelinkError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Rewrote {} links in {}", rewrite.changes(), path.display());
    }

    Ok(FileReport {
        name: name.to_owned(),
        changes: rewrite.changes(),
    })
}
