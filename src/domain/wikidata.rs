use std::fmt;

/// Base URL of every Wikidata page.
pub const WIKI_BASE_URL: &str = "https://www.wikidata.org/wiki/";

/// The item substituted for `!` placeholder links.
pub const PLACEHOLDER_ITEM: &str = "Q363948";

/// The Wikidata page a broken local link is redirected to.
///
/// Stems starting with an uppercase `P` name properties, which live in the
/// `Property:` namespace. Everything else is treated as an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikidataTarget<'a> {
    /// An item such as `Q42`.
    Item(&'a str),
    /// A property such as `P31`.
    Property(&'a str),
}

impl<'a> WikidataTarget<'a> {
    /// Classifies a link stem.
    #[must_use]
    pub fn from_stem(stem: &'a str) -> Self {
        if stem.starts_with('P') {
            Self::Property(stem)
        } else {
            Self::Item(stem)
        }
    }

    /// The identifier without any namespace prefix.
    #[must_use]
    pub const fn id(&self) -> &'a str {
        match self {
            Self::Item(id) | Self::Property(id) => id,
        }
    }

    /// The full page URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WikidataTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "{WIKI_BASE_URL}{id}"),
            Self::Property(id) => write!(f, "{WIKI_BASE_URL}Property:{id}"),
        }
    }
}
