//! Clipboard access.
//!
//! `navigator.clipboard` is only exposed by web-sys behind the unstable API
//! flag, so the call goes through `js_sys::Reflect`.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::ClipboardError;
use crate::utils::fetch::js_error_message;

/// Write `text` to the system clipboard.
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::NoWindow)?;
    let navigator = window.navigator();

    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
        .ok_or(ClipboardError::Unavailable)?;

    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or(ClipboardError::Unavailable)?;

    let promise: Promise = write
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| ClipboardError::Rejected(js_error_message(&e)))?
        .dyn_into()
        .map_err(|_| ClipboardError::Unavailable)?;

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(js_error_message(&e)))
}
