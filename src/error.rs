//! Error types of the browser-facing layer.
//!
//! - [`FetchError`] - Network/fetch failures for listing and content requests
//! - [`ClipboardError`] - Clipboard writes from the copy button
//!
//! Domain errors (listing payloads, rendering, configuration) live in
//! `mdshelf_core::error`.

use std::fmt;

use mdshelf_core::ListingError;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network error (connection failed, CORS, etc.)
    NetworkError(String),
    /// HTTP error with status code
    HttpError(u16),
    /// Response is not text (image, archive, ...)
    BinaryContent(String),
    /// Failed to read response body
    ResponseReadFailed,
    /// Response was not a `Response` object or not a string
    InvalidContent,
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP error: {}", status),
            Self::BinaryContent(content_type) => {
                write!(f, "Not a text file ({})", content_type)
            }
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for ListingError {
    fn from(err: FetchError) -> Self {
        ListingError::Fetch(err.to_string())
    }
}

/// Clipboard write errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Browser window not available
    NoWindow,
    /// `navigator.clipboard` missing (insecure context, old browser)
    Unavailable,
    /// The write was rejected (permission denied, document not focused)
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::Unavailable => write!(f, "Clipboard API not available"),
            Self::Rejected(msg) => write!(f, "Clipboard write rejected: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::HttpError(404).to_string(), "HTTP error: 404");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::BinaryContent("image/png".into()).to_string(),
            "Not a text file (image/png)"
        );
    }

    #[test]
    fn test_fetch_error_into_listing_error() {
        let err: ListingError = FetchError::HttpError(500).into();
        assert_eq!(err, ListingError::Fetch("HTTP error: 500".into()));
    }
}
