//! Viewer panel: the selected file's name and its content state.

mod code_block;
pub mod markdown;

use leptos::prelude::*;
use leptos_icons::Icon;
use mdshelf_core::ContentState;

use crate::app::AppContext;
use crate::components::icons as ic;
use markdown::MarkdownView;

stylance::import_crate_style!(css, "src/components/viewer/viewer.module.css");

#[component]
pub fn Viewer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let file_name = Memo::new(move |_| ctx.session.with(|s| s.selected().map(|f| f.name.clone())));
    let content = Memo::new(move |_| ctx.session.with(|s| s.content().clone()));

    view! {
        <section class=css::viewer aria-live="polite">
            {move || file_name.get().map(|name| view! { <h2 class=css::fileName>{name}</h2> })}
            {move || match content.get() {
                ContentState::Empty => view! {
                    <p class=css::placeholder>"Select a file to read it."</p>
                }.into_any(),
                ContentState::Loading => view! {
                    <p class=css::placeholder>"Loading..."</p>
                }.into_any(),
                ContentState::Failed(message) => view! {
                    <p class=css::error role="alert">
                        <Icon icon=ic::ERROR />
                        <span>{message}</span>
                    </p>
                }.into_any(),
                ContentState::Loaded(text) => view! { <MarkdownView source=text /> }.into_any(),
            }}
        </section>
    }
}
