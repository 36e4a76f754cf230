use std::{
    fmt,
    io::{self, Write},
    path::Path,
};

use relink::{DirectoryNamespace, FileReport, Progress, RunReport, SubdirectoryReport};

use super::terminal::Colorize;

/// Writes progress lines to `out` as a run proceeds.
///
/// [`Progress`] callbacks cannot fail, so the first write error is held back
/// and returned from [`Printer::summary`].
#[derive(Debug)]
pub struct Printer<W> {
    out: W,
    quiet: bool,
    dry_run: bool,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    pub const fn new(out: W, quiet: bool, dry_run: bool) -> Self {
        Self {
            out,
            quiet,
            dry_run,
            error: None,
        }
    }

    const fn verb(&self) -> &'static str {
        if self.dry_run {
            "Would modify"
        } else {
            "Modified"
        }
    }

    fn line(&mut self, line: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(format_args!("{line}\n")) {
            self.error = Some(e);
        }
    }

    /// Writes the totals for the whole run.
    ///
    /// Returns the first error hit while writing progress or the summary.
    pub fn summary(mut self, report: &RunReport) -> io::Result<()> {
        let totals = report.totals();

        self.line(format_args!(""));
        self.line(format_args!("All subdirectories processed."));
        self.line(format_args!("Subdirectories: {}", report.subdirectories().len()));
        self.line(format_args!("Total files processed: {}", totals.files_processed));
        self.line(format_args!("Files changed: {}", totals.files_changed));
        self.line(format_args!("Total items modified: {}", totals.links_changed));

        if report.is_dry_run() {
            self.line(format_args!("{}", "Dry run: no files were written.".dim()));
        }
        self.line(format_args!("{}", "Ready.".success()));

        match self.error {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }
}

impl<W: Write> Progress for Printer<W> {
    fn subdirectory_started(&mut self, namespace: &DirectoryNamespace) {
        if self.quiet {
            return;
        }
        self.line(format_args!(
            "Processing subdirectory: {}",
            namespace.path().display()
        ));
        self.line(format_args!("Found {} markdown files.", namespace.len()));
    }

    fn file_finished(&mut self, file: &FileReport) {
        if self.quiet {
            return;
        }
        let line = format!("{} {} items in {}", self.verb(), file.changes, file.name);
        if file.is_changed() {
            self.line(format_args!("{line}"));
        } else {
            self.line(format_args!("{}", line.dim()));
        }
    }

    fn checkpoint(&mut self, path: &Path, processed: usize) {
        if self.quiet {
            return;
        }
        let line = format!("... processed {processed} files so far in {}", path.display());
        self.line(format_args!("{}", line.dim()));
    }

    fn subdirectory_finished(&mut self, report: &SubdirectoryReport) {
        if self.quiet {
            return;
        }
        let totals = report.totals();
        self.line(format_args!(""));
        self.line(format_args!(
            "Subdirectory Summary for {}:",
            report.path().display()
        ));
        self.line(format_args!("Total files processed: {}", totals.files_processed));
        self.line(format_args!("Files changed: {}", totals.files_changed));
        self.line(format_args!("Total items modified: {}", totals.links_changed));
        self.line(format_args!(""));
    }
}
