//! Fenced code block with a language label and a copy button.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use mdshelf_core::render::CodeBlock;
use wasm_bindgen_futures::spawn_local;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::COPIED_LABEL;
use crate::utils::clipboard;

#[component]
pub fn CodeBlockView(block: CodeBlock) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let feedback_ms = ctx.config.with_value(|config| config.copy_feedback_ms);

    let copied = RwSignal::new(false);
    // Bumped on every successful copy; a timer only clears its own confirmation.
    let copies = StoredValue::new(0u64);
    let payload = StoredValue::new(block.copy_payload().to_string());

    let on_copy = move |_: leptos::ev::MouseEvent| {
        let text = payload.get_value();
        spawn_local(async move {
            if let Err(e) = clipboard::write_text(&text).await {
                log::warn!("copy failed: {}", e);
                return;
            }

            let Some(current) = copies.try_update_value(|n| {
                *n += 1;
                *n
            }) else {
                return;
            };
            copied.try_set(true);

            TimeoutFuture::new(feedback_ms).await;
            if copies.try_get_value() == Some(current) {
                copied.try_set(false);
            }
        });
    };

    let language = block.language().map(str::to_string);
    let code_class = block.class.clone().unwrap_or_default();
    let code = block.code;

    view! {
        <div class=css::codeBlock>
            <div class=css::codeHeader>
                {language.map(|lang| view! { <span class=css::language>{lang}</span> })}
                <button
                    class=move || {
                        if copied.get() {
                            format!("{} {}", css::copyButton, css::copied)
                        } else {
                            css::copyButton.to_string()
                        }
                    }
                    aria-label="Copy code to clipboard"
                    on:click=on_copy
                >
                    {move || if copied.get() {
                        view! { <Icon icon=ic::COPIED /><span>{COPIED_LABEL}</span> }.into_any()
                    } else {
                        view! { <Icon icon=ic::COPY /><span>"Copy"</span> }.into_any()
                    }}
                </button>
            </div>
            <pre class=css::code><code class=code_class>{code}</code></pre>
        </div>
    }
}
