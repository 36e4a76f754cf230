//! Filesystem-agnostic link rewriting.

mod config;
pub use config::{Config, DEFAULT_ROOT, WriteMode};

/// Markdown link discovery.
pub mod link;
pub use link::LinkOccurrence;

mod report;
pub use report::{FileReport, RunReport, SubdirectoryReport, Totals};

/// Whole-text link rewriting.
pub mod rewrite;
pub use rewrite::Rewrite;

/// Wikidata identifiers and URLs.
pub mod wikidata;
pub use wikidata::WikidataTarget;
