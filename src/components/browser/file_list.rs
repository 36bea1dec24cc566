//! File list with listing states.

use leptos::prelude::*;
use leptos_icons::Icon;
use mdshelf_core::{FileEntry, ListingState, Session};

use super::css;
use crate::actions::{load_listing, select_file};
use crate::app::AppContext;
use crate::components::icons as ic;

/// Listing state without the entries, so the list body only re-renders on
/// transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ListingStatus {
    Loading,
    Ready { total: usize },
    Failed(String),
}

impl From<&ListingState> for ListingStatus {
    fn from(state: &ListingState) -> Self {
        match state {
            ListingState::Loading => Self::Loading,
            ListingState::Ready(files) => Self::Ready { total: files.len() },
            ListingState::Failed(message) => Self::Failed(message.clone()),
        }
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let status = Memo::new(move |_| ctx.session.with(|s| ListingStatus::from(s.listing())));
    let visible = Memo::new(move |_| ctx.session.with(Session::visible_files));

    view! {
        {move || match status.get() {
            ListingStatus::Loading => view! {
                <div class=css::status>"Loading files..."</div>
            }.into_any(),
            ListingStatus::Failed(message) => view! {
                <div class=css::error role="alert">
                    <p class=css::errorMessage>
                        <Icon icon=ic::ERROR />
                        <span>{message}</span>
                    </p>
                    <button class=css::retryButton on:click=move |_| load_listing(ctx)>
                        <Icon icon=ic::RETRY />
                        <span>"Retry"</span>
                    </button>
                </div>
            }.into_any(),
            ListingStatus::Ready { total: 0 } => view! {
                <div class=css::status>"No markdown files found."</div>
            }.into_any(),
            ListingStatus::Ready { total } => view! {
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=|| view! { <div class=css::status>"No files match."</div> }
                >
                    <ul class=css::list role="listbox" aria-label="Markdown files">
                        <For
                            each=move || visible.get()
                            key=|entry| entry.locator.clone()
                            children=move |entry| view! { <FileListItem entry=entry /> }
                        />
                    </ul>
                </Show>
                <div class=css::count>
                    {move || format!("{} of {} files", visible.with(Vec::len), total)}
                </div>
            }.into_any(),
        }}
    }
}

#[component]
fn FileListItem(entry: FileEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_selected = Signal::derive({
        let entry = entry.clone();
        move || ctx.session.with(|s| s.is_selected(&entry))
    });

    let name = entry.name.clone();
    let full_name = entry.full_name.clone();
    let handle_click = move |_: leptos::ev::MouseEvent| select_file(ctx, entry.clone());

    view! {
        <li
            class=move || {
                if is_selected.get() {
                    format!("{} {}", css::item, css::selected)
                } else {
                    css::item.to_string()
                }
            }
            role="option"
            aria-selected=move || is_selected.get().to_string()
            title=full_name
            on:click=handle_click
        >
            <span class=css::itemIcon aria-hidden="true"><Icon icon=ic::FILE_TEXT /></span>
            <span class=css::itemName>{name}</span>
        </li>
    }
}
