use std::fmt::Write as _;

use super::{
    link,
    wikidata::{PLACEHOLDER_ITEM, WIKI_BASE_URL, WikidataTarget},
};

/// The result of rewriting one markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    text: String,
    changes: usize,
}

impl Rewrite {
    /// Rewrites every link in `text` whose target page is not local.
    ///
    /// `is_local` is asked about each target file name (`Q42.md`). Links it
    /// rejects become Wikidata links; external links are never touched. Two
    /// fixed substitutions for `!` placeholder links are applied afterwards.
    ///
    /// Each rewritten link counts as one change, and each fixed substitution
    /// counts as one change if it altered the text at all.
    #[must_use]
    pub fn apply(text: &str, is_local: impl Fn(&str) -> bool) -> Self {
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut changes = 0;

        for occurrence in link::occurrences(text) {
            if occurrence.is_external() {
                tracing::trace!("Leaving external link to {}", occurrence.file_name());
                continue;
            }

            let file_name = occurrence.file_name();
            if is_local(&file_name) {
                continue;
            }

            let target = WikidataTarget::from_stem(occurrence.stem());
            tracing::debug!("Rewriting link to {file_name} as {target}");

            let span = occurrence.span();
            output.push_str(&text[cursor..span.start]);
            let _ = write!(output, "[{}]({target})", occurrence.label());
            cursor = span.end;
            changes += 1;
        }
        output.push_str(&text[cursor..]);

        for (from, to) in placeholder_substitutions() {
            if output.contains(&from) {
                output = output.replace(&from, &to);
                changes += 1;
            }
        }

        Self {
            text: output,
            changes,
        }
    }

    /// The rewritten text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of changes made.
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.changes
    }

    /// Whether the document needs to be written back.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changes > 0
    }
}

/// `[!](!.md)` links end up as a link to the `!` page, which does not exist.
/// Both that and any stray `(!.md)` target are pointed at a fixed item.
fn placeholder_substitutions() -> [(String, String); 2] {
    let placeholder = format!("{WIKI_BASE_URL}{PLACEHOLDER_ITEM}");
    [
        (
            format!("[!]({WIKI_BASE_URL}!)"),
            format!("[{PLACEHOLDER_ITEM}]({placeholder})"),
        ),
        ("(!.md)".to_string(), format!("({placeholder})")),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn local(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn rewrite(text: &str, names: &[&str]) -> Rewrite {
        let local = local(names);
        Rewrite::apply(text, |name| local.contains(name))
    }

    #[test]
    fn text_without_md_links_is_unchanged() {
        let text = "# Q1\n\nPlain text with [a link](https://example.org) and (parens).\n";
        let result = rewrite(text, &[]);
        assert!(!result.is_changed());
        assert_eq!(result.text(), text);
    }

    #[test]
    fn local_links_are_kept() {
        let result = rewrite("[other](Q2.md)", &["Q1.md", "Q2.md"]);
        assert_eq!(result.changes(), 0);
        assert_eq!(result.text(), "[other](Q2.md)");
    }

    #[test]
    fn missing_items_point_to_wikidata() {
        let result = rewrite("[missing](Q999.md)", &["Q1.md"]);
        assert_eq!(result.changes(), 1);
        assert_eq!(
            result.text(),
            "[missing](https://www.wikidata.org/wiki/Q999)"
        );
    }

    #[test]
    fn missing_properties_point_to_property_namespace() {
        let result = rewrite("[prop](P31.md)", &[]);
        assert_eq!(
            result.text(),
            "[prop](https://www.wikidata.org/wiki/Property:P31)"
        );
    }

    #[test]
    fn external_links_are_never_rewritten() {
        let text = "[readme](https://example.org/README.md)";
        let result = rewrite(text, &[]);
        assert!(!result.is_changed());
        assert_eq!(result.text(), text);
    }

    #[test]
    fn rewrites_mixed_document() {
        let result = rewrite(
            "See [other](Q2.md) and [missing](Q999.md) and [prop](P31.md).",
            &["Q1.md", "Q2.md"],
        );
        assert_eq!(result.changes(), 2);
        assert_eq!(
            result.text(),
            "See [other](Q2.md) and [missing](https://www.wikidata.org/wiki/Q999) and \
             [prop](https://www.wikidata.org/wiki/Property:P31)."
        );
    }

    #[test]
    fn bang_link_becomes_placeholder_item() {
        let result = rewrite("[!](!.md)", &[]);
        // One for the link itself, one for the placeholder substitution.
        assert_eq!(result.changes(), 2);
        assert_eq!(
            result.text(),
            "[Q363948](https://www.wikidata.org/wiki/Q363948)"
        );
    }

    #[test]
    fn stray_bang_target_becomes_placeholder_url() {
        let result = rewrite("orphan (!.md) target (!.md)", &[]);
        assert_eq!(result.changes(), 1);
        assert_eq!(
            result.text(),
            "orphan (https://www.wikidata.org/wiki/Q363948) target \
             (https://www.wikidata.org/wiki/Q363948)"
        );
    }

    #[test]
    fn second_pass_makes_no_changes() {
        let names = ["Q1.md", "Q2.md"];
        let first = rewrite(
            "[a](Q2.md) [b](Q3.md)\n[c](P17.md) [!](!.md) (!.md) [d](https://x.org/y.md)",
            &names,
        );
        assert!(first.is_changed());

        let second = rewrite(first.text(), &names);
        assert_eq!(second.changes(), 0);
        assert_eq!(second.text(), first.text());
    }

    #[test]
    fn links_split_across_lines_are_rewritten() {
        let result = rewrite("[located\nin](P131.md)", &[]);
        assert_eq!(
            result.text(),
            "[located\nin](https://www.wikidata.org/wiki/Property:P131)"
        );
    }

    #[test]
    fn surrounding_text_is_preserved_byte_for_byte() {
        let result = rewrite("é\r\n[x](Q5.md)\r\nü", &[]);
        assert_eq!(result.text(), "é\r\n[x](https://www.wikidata.org/wiki/Q5)\r\nü");
    }
}
