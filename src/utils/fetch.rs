//! Network fetching utilities with timeout support.
//!
//! Every request goes through [`fetch_text`], which races the Fetch API
//! promise and then the body read against one shared time budget, and
//! rejects binary responses.

use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::BINARY_CONTENT_TYPES;
use crate::error::FetchError;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
///
/// The timer promise resolves to `undefined`, so an `undefined` winner is
/// read as a timeout.
pub async fn race_with_timeout(promise: Promise, timeout_ms: u32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };
    let timeout_ms = i32::try_from(timeout_ms).unwrap_or(i32::MAX);

    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(js_error_message(&e)),
    }
}

/// Best-effort message of a rejected promise (`TypeError: Failed to fetch`).
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

/// Milliseconds left of `timeout_ms` after `elapsed_ms`; zero once spent.
pub fn remaining_budget(timeout_ms: u32, elapsed_ms: f64) -> u32 {
    let remaining = f64::from(timeout_ms) - elapsed_ms.max(0.0);
    if remaining <= 0.0 {
        0
    } else {
        remaining.ceil() as u32
    }
}

// =============================================================================
// Content Type
// =============================================================================

/// Whether a response with this `Content-Type` may be shown as text.
///
/// A missing header is accepted; static hosts often omit it for `.md`.
pub fn is_textual_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    !BINARY_CONTENT_TYPES
        .iter()
        .any(|binary| mime.starts_with(binary))
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// Fetch a directory listing body.
pub async fn fetch_listing(url: &str, timeout_ms: u32) -> Result<String, FetchError> {
    fetch_text(url, timeout_ms).await
}

/// Fetch the raw markdown of a file.
pub async fn fetch_content(url: &str, timeout_ms: u32) -> Result<String, FetchError> {
    fetch_text(url, timeout_ms).await
}

/// GET `url` as text, bounded by `timeout_ms`.
async fn fetch_text(url: &str, timeout_ms: u32) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let started = js_sys::Date::now();
    let fetch_promise = window.fetch_with_request(&request);

    // Resolves once the headers arrive
    let resp: Response = match race_with_timeout(fetch_promise, timeout_ms).await {
        RaceResult::TimedOut => return Err(FetchError::Timeout),
        RaceResult::Error(msg) => return Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            result.dyn_into().map_err(|_| FetchError::InvalidContent)?
        }
    };

    if !resp.ok() {
        return Err(FetchError::HttpError(resp.status()));
    }

    let content_type = resp.headers().get("content-type").ok().flatten();
    if !is_textual_content_type(content_type.as_deref()) {
        return Err(FetchError::BinaryContent(content_type.unwrap_or_default()));
    }

    // The body gets whatever is left of the same budget
    let remaining = remaining_budget(timeout_ms, js_sys::Date::now() - started);
    if remaining == 0 {
        return Err(FetchError::Timeout);
    }
    let text_promise = resp.text().map_err(|_| FetchError::ResponseReadFailed)?;

    match race_with_timeout(text_promise, remaining).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(_) => Err(FetchError::ResponseReadFailed),
        RaceResult::Completed(text) => text.as_string().ok_or(FetchError::InvalidContent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textual_content_types() {
        assert!(is_textual_content_type(None));
        assert!(is_textual_content_type(Some("text/markdown")));
        assert!(is_textual_content_type(Some("text/plain; charset=utf-8")));
        assert!(is_textual_content_type(Some("application/json")));
    }

    #[test]
    fn test_remaining_budget() {
        assert_eq!(remaining_budget(10_000, 0.0), 10_000);
        assert_eq!(remaining_budget(10_000, 2_500.4), 7_500);
        assert_eq!(remaining_budget(10_000, 10_000.0), 0);
        assert_eq!(remaining_budget(10_000, 12_000.0), 0);
        // Clock skew never extends the budget
        assert_eq!(remaining_budget(10_000, -50.0), 10_000);
    }

    #[test]
    fn test_binary_content_types() {
        assert!(!is_textual_content_type(Some("image/png")));
        assert!(!is_textual_content_type(Some("Application/PDF")));
        assert!(!is_textual_content_type(Some("application/octet-stream")));
        assert!(!is_textual_content_type(Some("video/mp4; codecs=avc1")));
    }
}
