//! Browsing session state.
//!
//! [`Session`] owns everything the user can change (query, sort order,
//! selection, theme) plus the results of the two asynchronous operations: the
//! directory listing and the selected file's content. All mutation goes through
//! its methods, which the app calls from the single browser thread.
//!
//! # Stale fetches
//!
//! Every call to [`Session::select`] bumps a generation counter and hands out a
//! [`FetchTicket`] carrying it. [`Session::complete`] drops results whose ticket
//! no longer matches, so a slow fetch for an earlier selection can never
//! overwrite the content of a later one.

use std::fmt::Display;

use crate::config::AppConfig;
use crate::entry::FileEntry;
use crate::error::ListingError;
use crate::search::{self, SortOrder};
use crate::theme::Theme;

/// State of the directory listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListingState {
    /// Listing request in flight
    #[default]
    Loading,
    /// All entries, in source order
    Ready(Vec<FileEntry>),
    /// Listing failed; the message is shown to the user
    Failed(String),
}

/// State of the selected file's content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentState {
    /// Nothing selected yet
    #[default]
    Empty,
    /// Fetch for the current selection in flight
    Loading,
    /// Raw markdown of the current selection
    Loaded(String),
    /// Fetch for the current selection failed
    Failed(String),
}

/// Handle for one in-flight content fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    /// URL to fetch
    pub locator: String,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The browser's top-level state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    listing: ListingState,
    query: String,
    sort_order: SortOrder,
    selected: Option<FileEntry>,
    content: ContentState,
    theme: Theme,
    generation: u64,
}

impl Session {
    /// Fresh session using the configured defaults.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sort_order: config.default_sort,
            theme: config.default_theme,
            ..Self::default()
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    /// Mark the listing as loading (initial load or retry).
    pub fn begin_listing(&mut self) {
        self.listing = ListingState::Loading;
    }

    /// Store the outcome of a listing fetch.
    pub fn finish_listing(&mut self, result: Result<Vec<FileEntry>, ListingError>) {
        self.listing = match result {
            Ok(files) => {
                log::info!("listing loaded: {} markdown files", files.len());
                ListingState::Ready(files)
            }
            Err(e) => {
                log::warn!("listing failed: {}", e);
                ListingState::Failed(e.to_string())
            }
        };
    }

    /// All entries, or an empty slice while loading or after a failure.
    pub fn all_files(&self) -> &[FileEntry] {
        match &self.listing {
            ListingState::Ready(files) => files,
            _ => &[],
        }
    }

    /// The displayed list: `sort(filter(all_files, query), sort_order)`.
    pub fn visible_files(&self) -> Vec<FileEntry> {
        search::apply(self.all_files(), &self.query, self.sort_order)
    }

    // =========================================================================
    // Query, order, theme
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected(&self) -> Option<&FileEntry> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, file: &FileEntry) -> bool {
        self.selected.as_ref() == Some(file)
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    /// Select `file` and return the ticket for its content fetch.
    ///
    /// The selection is visible immediately; content switches to
    /// [`ContentState::Loading`] until the matching [`Session::complete`].
    pub fn select(&mut self, file: FileEntry) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            locator: file.locator.clone(),
        };
        log::debug!("select {} (generation {})", file.full_name, self.generation);
        self.selected = Some(file);
        self.content = ContentState::Loading;
        ticket
    }

    /// Apply a finished content fetch.
    ///
    /// Returns `false` and leaves the state untouched when the ticket belongs
    /// to an earlier selection.
    pub fn complete<E: Display>(&mut self, ticket: FetchTicket, result: Result<String, E>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding stale fetch for {} (generation {} != {})",
                ticket.locator,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.content = match result {
            Ok(text) => ContentState::Loaded(text),
            Err(e) => {
                log::warn!("failed to load {}: {}", ticket.locator, e);
                ContentState::Failed(e.to_string())
            }
        };
        true
    }
}
