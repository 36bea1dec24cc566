//! Query input and sort order toggle.

use leptos::prelude::*;
use leptos_icons::Icon;
use mdshelf_core::{Session, SortOrder};

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::SEARCH_PLACEHOLDER;

#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let query = Memo::new(move |_| ctx.session.with(|s| s.query().to_string()));

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        ctx.session.update(|s| s.set_query(value));
    };

    view! {
        <div class=css::searchBar>
            <label class=css::searchField>
                <span class=css::searchIcon aria-hidden="true"><Icon icon=ic::SEARCH /></span>
                <input
                    class=css::searchInput
                    type="search"
                    placeholder=SEARCH_PLACEHOLDER
                    aria-label="Filter files by name"
                    prop:value=move || query.get()
                    on:input=on_input
                />
            </label>
            <div class=css::sortGroup role="group" aria-label="Sort order">
                <SortButton order=SortOrder::Latest />
                <SortButton order=SortOrder::Oldest />
            </div>
        </div>
    }
}

#[component]
fn SortButton(order: SortOrder) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let active = Memo::new(move |_| ctx.session.with(Session::sort_order) == order);
    let icon = match order {
        SortOrder::Latest => ic::SORT_LATEST,
        SortOrder::Oldest => ic::SORT_OLDEST,
    };

    view! {
        <button
            class=move || {
                if active.get() {
                    format!("{} {}", css::sortButton, css::sortActive)
                } else {
                    css::sortButton.to_string()
                }
            }
            aria-pressed=move || active.get().to_string()
            on:click=move |_| ctx.session.update(|s| s.set_sort_order(order))
        >
            <Icon icon=icon />
            <span>{order.label()}</span>
        </button>
    }
}
