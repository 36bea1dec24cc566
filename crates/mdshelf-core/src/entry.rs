//! Markdown file entries and display-name normalization.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Content-hash segment inserted by the bundle tool (`name.<20 hex>.md`).
static HASHED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.[a-f0-9]{20}\.md$").expect("hashed suffix pattern is valid")
});

/// One markdown resource in the listing.
///
/// Entries are built once per load by a [`crate::FileSource`] and never
/// mutated afterwards; views only filter and reorder clones of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display name (directory, content hash and `.md` stripped).
    pub name: String,
    /// Original identifier, used for ordering.
    pub full_name: String,
    /// URL the raw markdown is fetched from.
    pub locator: String,
}

impl FileEntry {
    /// Create an entry, deriving the display name from `full_name`.
    pub fn new(full_name: impl Into<String>, locator: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            name: display_name(&full_name),
            full_name,
            locator: locator.into(),
        }
    }

    /// Case-insensitive substring match against the display name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Strip the directory prefix, any content-hash segment and the `.md` suffix.
///
/// ```
/// use mdshelf_core::display_name;
///
/// assert_eq!(display_name("./notes/2024-rust.0123456789abcdef0123.md"), "2024-rust");
/// assert_eq!(display_name("readme.md"), "readme");
/// ```
pub fn display_name(identifier: &str) -> String {
    let base = identifier
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(identifier);
    let unhashed = HASHED_SUFFIX.replace(base, "");
    unhashed
        .strip_suffix(".md")
        .unwrap_or(&unhashed)
        .to_string()
}

/// Whether an identifier names a markdown file.
pub(crate) fn is_markdown(name: &str) -> bool {
    name.ends_with(".md")
}
