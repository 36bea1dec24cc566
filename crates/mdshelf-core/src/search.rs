//! Search and sort over the file listing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::FileEntry;

/// Listing order, by original identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Descending by `full_name` (date-prefixed names show newest first)
    #[default]
    Latest,
    /// Ascending by `full_name`
    Oldest,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "Latest",
            Self::Oldest => "Oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Filter `files` by `query` and sort the matches by `order`.
///
/// Matching is a case-insensitive substring test on the display name; an
/// empty query keeps every file. Ordering compares `full_name`, not `name`,
/// so identifiers with date prefixes sort chronologically. The sort is
/// stable and the function is idempotent.
pub fn apply(files: &[FileEntry], query: &str, order: SortOrder) -> Vec<FileEntry> {
    let needle = query.to_lowercase();
    let mut matches: Vec<FileEntry> = files
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match order {
        SortOrder::Latest => matches.sort_by(|a, b| b.full_name.cmp(&a.full_name)),
        SortOrder::Oldest => matches.sort_by(|a, b| a.full_name.cmp(&b.full_name)),
    }

    matches
}
