use std::{
    io::{self, Write},
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
};

mod printer;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use printer::Printer;
use relink::{Config, DocsTree, RunReport, WriteMode, domain::DEFAULT_ROOT};
use terminal::Colorize;
use tracing::instrument;

/// Rewrite links to missing markdown pages as Wikidata links.
///
/// Every immediate subdirectory of the root is processed on its own: a link
/// such as `[label](Q42.md)` is kept if `Q42.md` exists in the same
/// subdirectory, and otherwise becomes a link to the Wikidata page for `Q42`.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The documentation root whose subdirectories are processed
    #[arg(short, long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Show what would be changed without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Check for broken links without making changes (exits with code 2 if
    /// any file would change)
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,

    /// Process the files of each subdirectory in parallel
    #[arg(long)]
    parallel: bool,

    /// Print a progress line after every N files of a subdirectory
    /// [default: 200]
    #[arg(long, value_name = "N")]
    progress_interval: Option<NonZeroUsize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress per-file progress; print only the summary
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Progress lines and summaries
    #[default]
    Table,
    /// A single JSON report
    Json,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        Self::setup_logging(self.verbose);

        let report = self.execute(&mut io::stdout().lock())?;
        Ok(ExitCode::from(self.exit_code(&report)))
    }

    /// Exit status for a finished run: 2 if `--check` found files that would
    /// change, 0 otherwise.
    const fn exit_code(&self, report: &RunReport) -> u8 {
        if self.check && report.has_changes() {
            2
        } else {
            0
        }
    }

    fn config(&self) -> Config {
        let write_mode = if self.dry_run || self.check {
            WriteMode::DryRun
        } else {
            WriteMode::Apply
        };
        let mut config = Config::new(self.root.clone())
            .with_write_mode(write_mode)
            .with_parallel(self.parallel);
        if let Some(interval) = self.progress_interval {
            config = config.with_progress_interval(interval);
        }
        config
    }

    /// Runs the rewrite, writing all user-facing output to `out`.
    #[instrument(level = "debug", skip(self, out))]
    fn execute(&self, out: &mut impl Write) -> anyhow::Result<RunReport> {
        let config = self.config();
        let tree = DocsTree::open(config.root())?;
        let subdirectories = tree
            .subdirectories()
            .with_context(|| format!("failed to list {}", tree.root().display()))?;

        if subdirectories.is_empty() {
            let report = RunReport::new(tree.root().to_path_buf(), config.is_dry_run());
            match self.output {
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                }
                OutputFormat::Table => {
                    let message =
                        format!("No subdirectories found in '{}/'.", tree.root().display());
                    writeln!(out, "{}", message.warning())?;
                }
            }
            return Ok(report);
        }

        match self.output {
            OutputFormat::Json => {
                let report = tree.rewrite(&config, &mut ())?;
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                Ok(report)
            }
            OutputFormat::Table => {
                let mut printer = Printer::new(&mut *out, self.quiet, config.is_dry_run());
                let report = tree.rewrite(&config, &mut printer)?;
                printer.summary(&report)?;
                Ok(report)
            }
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
