//! Page frame.
//!
//! The theme class set here defines the CSS custom properties every nested
//! component module reads, so only the shell switches on the theme.

use leptos::prelude::*;
use leptos_icons::Icon;
use mdshelf_core::{FileSource, Session, Theme};

use crate::app::AppContext;
use crate::components::browser::Browser;
use crate::components::icons as ic;
use crate::components::viewer::Viewer;

stylance::import_crate_style!(css, "src/components/shell.module.css");

fn theme_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => css::light,
        Theme::Dark => css::dark,
    }
}

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (title, source_label, source_icon) = ctx.config.with_value(|config| {
        let icon = match config.source {
            FileSource::GitHub { .. } => ic::GITHUB,
            FileSource::Local { .. } => ic::FOLDER,
        };
        (config.title.clone(), config.source.label(), icon)
    });

    let theme = Memo::new(move |_| ctx.session.with(Session::theme));

    let toggle_theme = move |_: leptos::ev::MouseEvent| {
        ctx.session.update(Session::toggle_theme);
    };

    view! {
        <div class=move || format!("{} {}", css::shell, theme_class(theme.get()))>
            <header class=css::header>
                <span class=css::logo aria-hidden="true"><Icon icon=ic::LIBRARY /></span>
                <h1 class=css::title>{title}</h1>
                <span class=css::source title=source_label.clone()>
                    <Icon icon=source_icon />
                    <span class=css::sourceLabel>{source_label.clone()}</span>
                </span>
                <button
                    class=css::themeToggle
                    on:click=toggle_theme
                    aria-label=move || format!("Switch to {} theme", theme.get().toggle())
                    title=move || format!("Switch to {} theme", theme.get().toggle())
                >
                    {move || {
                        let icon = if theme.get().is_dark() { ic::THEME_LIGHT } else { ic::THEME_DARK };
                        view! { <Icon icon=icon /> }
                    }}
                </button>
            </header>
            <main class=css::panels>
                <Browser />
                <Viewer />
            </main>
        </div>
    }
}
