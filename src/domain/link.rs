//! Discovery of `[label](stem.md)` links in markdown text.
//!
//! This is a textual match, not a markdown parse. Links inside code fences or
//! behind escaped brackets are found all the same.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

/// `[label](stem.md)`, non-greedy in both groups, allowed to span lines.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[(.*?)\]\((.*?)\.md\)").expect("link pattern is a valid regex")
});

/// A single markdown link to a `.md` target, borrowed from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence<'a> {
    label: &'a str,
    stem: &'a str,
    span: Range<usize>,
}

impl<'a> LinkOccurrence<'a> {
    /// The link text between the square brackets.
    #[must_use]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    /// The link target with the `.md` suffix removed.
    #[must_use]
    pub const fn stem(&self) -> &'a str {
        self.stem
    }

    /// Byte range of the whole link within the scanned text.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The target file name, `<stem>.md`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.md", self.stem)
    }

    /// Whether the target is a URL rather than a local page.
    ///
    /// Any target containing `://` counts, even one that happens to end in
    /// `.md`.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.file_name().contains("://")
    }
}

/// Iterates over every `[label](stem.md)` link in `text`, leftmost first.
///
/// Matches never overlap. An external link still consumes its span, so any
/// link text nested inside it is not reported separately.
pub fn occurrences(text: &str) -> impl Iterator<Item = LinkOccurrence<'_>> {
    LINK_PATTERN.captures_iter(text).filter_map(|captures| {
        let whole = captures.get(0)?;
        let label = captures.get(1)?;
        let stem = captures.get(2)?;
        Some(LinkOccurrence {
            label: label.as_str(),
            stem: stem.as_str(),
            span: whole.range(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(&str, &str)> {
        occurrences(text).map(|l| (l.label(), l.stem())).collect()
    }

    #[test]
    fn finds_simple_link() {
        let links: Vec<_> = occurrences("see [Douglas Adams](Q42.md) here").collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label(), "Douglas Adams");
        assert_eq!(links[0].stem(), "Q42");
        assert_eq!(links[0].file_name(), "Q42.md");
        assert_eq!(links[0].span(), 4..27);
        assert!(!links[0].is_external());
    }

    #[test]
    fn finds_adjacent_links_non_greedily() {
        assert_eq!(
            collect("[a](Q1.md) and [b](Q2.md), [c](P31.md)"),
            vec![("a", "Q1"), ("b", "Q2"), ("c", "P31")]
        );
    }

    #[test]
    fn ignores_links_without_md_suffix() {
        assert!(collect("[a](Q1) [b](Q2.html) [c](https://example.org)").is_empty());
    }

    #[test]
    fn matches_links_split_across_lines() {
        assert_eq!(collect("[instance\nof](P31.md)"), vec![("instance\nof", "P31")]);
    }

    #[test]
    fn flags_external_targets() {
        let links: Vec<_> = occurrences("[readme](https://example.org/README.md)").collect();
        assert_eq!(links.len(), 1);
        assert!(links[0].is_external());
    }

    #[test]
    fn label_absorbs_earlier_brackets() {
        // Textual matching starts at the first '[' it sees.
        assert_eq!(collect("[a] then [b](Q2.md)"), vec![("a] then [b", "Q2")]);
    }

    #[test]
    fn accepts_empty_label_and_stem() {
        assert_eq!(collect("[](.md)"), vec![("", "")]);
    }
}
