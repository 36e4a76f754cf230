use std::{
    collections::BTreeSet,
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::{DirEntry, WalkDir};

use super::RelinkError;

/// The markdown files directly inside one subdirectory.
///
/// A link is local if and only if its target file name is in this set. Pages
/// in sibling, parent or nested directories are never considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNamespace {
    path: PathBuf,
    files: BTreeSet<String>,
}

impl DirectoryNamespace {
    /// Lists the `.md` files in the directory at `path`.
    ///
    /// Only regular files (or symlinks to them) are included; nested
    /// directories are not descended into. Dangling symlinks are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, or any entry in it, cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RelinkError> {
        let path = path.into();
        let mut files = BTreeSet::new();

        for entry in WalkDir::new(&path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let Some(entry) = listed(entry)? else {
                continue;
            };
            if !entry.file_type().is_file() || entry.path().extension() != Some(OsStr::new("md"))
            {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!(
                    "Skipping file with non UTF-8 name: {}",
                    entry.path().display()
                );
                continue;
            };
            files.insert(name.to_owned());
        }

        tracing::debug!("Found {} markdown files in {}", files.len(), path.display());

        Ok(Self { path, files })
    }

    /// The directory this namespace was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `file_name` (for example `Q42.md`) exists in this directory.
    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    /// Number of markdown files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the directory holds no markdown files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Full path of the file called `name` in this directory.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Unwraps one entry of a directory listing.
///
/// A symlink whose target no longer exists yields `Ok(None)` with a warning;
/// any other listing failure is an error.
pub(super) fn listed(
    entry: Result<DirEntry, walkdir::Error>,
) -> Result<Option<DirEntry>, RelinkError> {
    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(err) if is_dangling_symlink(&err) => {
            if let Some(path) = err.path() {
                tracing::warn!("Skipping dangling symlink: {}", path.display());
            }
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn is_dangling_symlink(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    not_found
        && err.path().is_some_and(|path| {
            fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink())
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn lists_markdown_files_only() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("Q2.md"), "").unwrap();
        fs::write(dir.join("Q1.md"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("Q3.markdown"), "").unwrap();

        let namespace = DirectoryNamespace::load(dir).unwrap();

        assert_eq!(namespace.len(), 2);
        assert_eq!(namespace.names().collect::<Vec<_>>(), vec!["Q1.md", "Q2.md"]);
        assert!(namespace.contains("Q1.md"));
        assert!(!namespace.contains("notes.txt"));
        assert_eq!(namespace.file_path("Q1.md"), dir.join("Q1.md"));
    }

    #[test]
    fn ignores_directories_and_nested_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::create_dir(dir.join("archive.md")).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("Q9.md"), "").unwrap();

        let namespace = DirectoryNamespace::load(dir).unwrap();

        assert!(namespace.is_empty());
        assert!(!namespace.contains("archive.md"));
        assert!(!namespace.contains("Q9.md"));
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("Q1.md"), "").unwrap();
        symlink(dir.join("gone.txt"), dir.join("stale.txt")).unwrap();
        symlink(dir.join("gone.md"), dir.join("Q2.md")).unwrap();

        let namespace = DirectoryNamespace::load(dir).unwrap();

        assert_eq!(namespace.names().collect::<Vec<_>>(), vec!["Q1.md"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = DirectoryNamespace::load(tmp.path().join("absent"));
        assert!(matches!(result, Err(RelinkError::Walk(_))));
    }
}
