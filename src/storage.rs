pub mod docs;
mod error;
/// The set of markdown pages in one subdirectory.
pub mod namespace;

pub use docs::{DocsTree, Progress, rewrite_file, rewrite_subdirectory};
pub use error::RelinkError;
pub use namespace::DirectoryNamespace;
