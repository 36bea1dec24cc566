//! Platform-independent logic for the mdshelf markdown browser.
//!
//! Everything here is plain Rust with no browser dependency, so the whole
//! browsing model can be exercised with `cargo test` on the host:
//!
//! - [`FileEntry`] and display-name normalization
//! - [`FileSource`] - where the listing comes from (local bundle or GitHub)
//! - [`search::apply`] - filter-then-sort over the listing
//! - [`Session`] - selection state machine with stale-fetch protection
//! - [`render_document`] - markdown to a typed node tree
//! - [`Theme`] and [`AppConfig`]

pub mod config;
mod entry;
pub mod error;
pub mod render;
pub mod search;
mod session;
pub mod source;
mod theme;

pub use config::AppConfig;
pub use entry::{FileEntry, display_name};
pub use error::{ConfigError, ListingError, RenderError};
pub use render::{Document, Node, NodeKind, render_document};
pub use search::SortOrder;
pub use session::{ContentState, FetchTicket, ListingState, Session};
pub use source::FileSource;
pub use theme::Theme;
