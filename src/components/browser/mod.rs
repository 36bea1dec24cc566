//! File browser panel: search bar above the file list.

mod file_list;
mod search_bar;

use leptos::prelude::*;

pub use file_list::FileList;
pub use search_bar::SearchBar;

stylance::import_crate_style!(css, "src/components/browser/browser.module.css");

#[component]
pub fn Browser() -> impl IntoView {
    view! {
        <aside class=css::browser aria-label="Files">
            <SearchBar />
            <FileList />
        </aside>
    }
}
