//! Wikidata link rewriting for markdown documentation trees
//!
//! A documentation root holds one subdirectory per namespace, each full of
//! markdown pages named after Wikidata identifiers (`Q42.md`, `P31.md`, ...).
//! Links between pages of the same subdirectory stay local; links to pages
//! that do not exist locally are rewritten to point at Wikidata itself.

pub mod domain;
pub use domain::{
    Config, FileReport, LinkOccurrence, Rewrite, RunReport, SubdirectoryReport, WikidataTarget,
    WriteMode,
};

/// Filesystem access to the documentation tree.
pub mod storage;
pub use storage::{DirectoryNamespace, DocsTree, Progress, RelinkError};
