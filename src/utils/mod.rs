//! Browser utilities.
//!
//! Provides:
//! - [`fetch_listing`], [`fetch_content`] - Network fetching with timeout
//! - [`clipboard::write_text`] - Clipboard writes
//! - [`dom`] - Document helpers

pub mod clipboard;
pub mod dom;
mod fetch;

pub use fetch::{fetch_content, fetch_listing};
