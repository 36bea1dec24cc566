//! Root application module.
//!
//! Contains the main App component and the AppContext definition.

use leptos::prelude::*;
use mdshelf_core::{AppConfig, Session};

use crate::actions::load_listing;
use crate::components::Shell;
use crate::config::app_config;
use crate::utils::dom;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read by every component
/// with `use_context::<AppContext>()`. The struct is `Copy` because both
/// fields are arena handles.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The browsing session (listing, query, sort, selection, content, theme).
    pub session: RwSignal<Session>,

    /// Runtime configuration; never changes after startup.
    pub config: StoredValue<AppConfig>,
}

impl AppContext {
    /// Creates a context whose session starts from the configured defaults.
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: RwSignal::new(Session::new(&config)),
            config: StoredValue::new(config),
        }
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Starts the listing fetch
/// - Keeps the document theme attribute in sync with the session
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(app_config());
    provide_context(ctx);

    ctx.config.with_value(|config| dom::set_title(&config.title));

    Effect::new(move |_| {
        let theme = ctx.session.with(Session::theme);
        dom::apply_document_theme(theme);
    });

    load_listing(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #16181d;
                    color: #e6e6e6;
                    font-family: system-ui, sans-serif;
                ">
                    <h1 style="color: #ff6b6b; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="color: #a0a0a0; margin-bottom: 2rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                    >
                        "Reload"
                    </button>
                </div>
            }
        >
            <Shell />
        </ErrorBoundary>
    }
}
