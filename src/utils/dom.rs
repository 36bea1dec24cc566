//! DOM and Web API utility functions.

use leptos::prelude::document;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use mdshelf_core::Theme;

/// Find the mount point by element id.
pub fn element_by_id(id: &str) -> Option<HtmlElement> {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Mirror the theme on `<html data-theme="...">` so the page background
/// outside the app follows it.
pub fn apply_document_theme(theme: Theme) {
    if let Some(root) = document().document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Set the document title.
pub fn set_title(title: &str) {
    document().set_title(title);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_apply_document_theme() {
        apply_document_theme(Theme::Light);
        let root = document().document_element().unwrap();
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));

        apply_document_theme(Theme::Dark);
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    }

    #[wasm_bindgen_test]
    fn test_missing_element() {
        assert!(element_by_id("no-such-element").is_none());
    }
}
