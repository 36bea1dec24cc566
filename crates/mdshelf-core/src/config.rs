//! Application configuration.
//!
//! The shipped configuration lives in `assets/config.toml` and is compiled into
//! the app; [`AppConfig::from_toml_str`] parses it. Every field has a default,
//! so a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::SortOrder;
use crate::source::FileSource;
use crate::theme::Theme;

/// Default fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u32 = 10_000;

/// Default lifetime of the "copied" confirmation in milliseconds.
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2_000;

/// Runtime configuration, injected into the app context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page title shown in the header
    pub title: String,
    /// Where the listing comes from
    pub source: FileSource,
    /// Timeout for listing and content fetches
    pub fetch_timeout_ms: u32,
    /// How long the copy confirmation stays visible
    pub copy_feedback_ms: u32,
    /// Theme every session starts with
    pub default_theme: Theme,
    /// Sort order every session starts with
    pub default_sort: SortOrder,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "mdshelf".to_string(),
            source: FileSource::local("files"),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            default_theme: Theme::default(),
            default_sort: SortOrder::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML configuration document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Replace the source, keeping everything else.
    #[must_use]
    pub fn with_source(mut self, source: FileSource) -> Self {
        self.source = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_github_source() {
        let config = AppConfig::from_toml_str(
            r#"
            title = "Team notes"
            fetch_timeout_ms = 5000

            [source]
            kind = "github"
            owner = "octo"
            repo = "handbook"
            dir = "docs"
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Team notes");
        assert_eq!(config.fetch_timeout_ms, 5000);
        assert_eq!(config.copy_feedback_ms, DEFAULT_COPY_FEEDBACK_MS);
        assert_eq!(config.source, FileSource::github("octo", "handbook", "docs"));
    }

    #[test]
    fn test_theme_and_sort_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            default_theme = "light"
            default_sort = "oldest"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.default_sort, SortOrder::Oldest);
    }

    #[test]
    fn test_unknown_source_kind_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [source]
            kind = "ftp"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_with_source() {
        let config = AppConfig::default().with_source(FileSource::local("bundle"));
        assert_eq!(config.source, FileSource::local("bundle"));
        assert_eq!(config.fetch_timeout_ms, DEFAULT_FETCH_TIMEOUT_MS);
    }
}
