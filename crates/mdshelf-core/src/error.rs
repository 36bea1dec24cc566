//! Error types for listing, rendering and configuration.
//!
//! - [`ListingError`] - the directory listing could not be obtained or parsed
//! - [`RenderError`] - markdown could not be turned into a node tree
//! - [`ConfigError`] - the configuration file is malformed

use thiserror::Error;

/// Directory listing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The listing request itself failed (network, timeout, HTTP status).
    #[error("failed to fetch listing: {0}")]
    Fetch(String),
    /// The remote API answered with an error object.
    #[error("listing API error: {0}")]
    Api(String),
    /// The payload was valid JSON but not a list of entries.
    #[error("listing payload is not a list")]
    NotAList,
    /// The payload was not valid JSON.
    #[error("invalid listing JSON: {0}")]
    Json(String),
}

/// Markdown rendering failures.
///
/// The viewer falls back to showing the raw text on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Block or inline nesting exceeded the supported depth.
    #[error("markdown nesting deeper than {limit} levels")]
    TooDeep { limit: usize },
    /// The parser produced an end event without a matching start.
    #[error("unbalanced markdown event stream")]
    Unbalanced,
}

/// Configuration parsing failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
