//! Application configuration.
//!
//! The runtime configuration is loaded from `assets/config.toml`, compiled in
//! with `include_str!`. UI constants that are not worth configuring live here
//! as plain constants.

use mdshelf_core::AppConfig;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Shipped configuration file.
const CONFIG_TOML: &str = include_str!("../assets/config.toml");

/// Parse the shipped configuration, falling back to defaults when it is
/// malformed.
pub fn app_config() -> AppConfig {
    match AppConfig::from_toml_str(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; using defaults", e);
            AppConfig::default()
        }
    }
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Content types that are never shown as markdown source.
pub const BINARY_CONTENT_TYPES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
];

// =============================================================================
// UI Configuration
// =============================================================================

/// Placeholder text of the search input.
pub const SEARCH_PLACEHOLDER: &str = "Type file name...";

/// Label of the copy button once the copy succeeded.
pub const COPIED_LABEL: &str = "Copied!";
