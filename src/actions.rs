//! Asynchronous session actions.
//!
//! Both actions run on the browser thread via `spawn_local` and feed their
//! results back into the [`Session`](mdshelf_core::Session) held by the
//! [`AppContext`]. `try_update` is used on completion so a fetch finishing
//! after the app was unmounted is a no-op.

use leptos::prelude::*;
use mdshelf_core::{FileEntry, ListingError, Session};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::utils::{fetch_content, fetch_listing};

/// Fetch the directory listing of the configured source.
///
/// Called once at startup and again from the retry button.
pub fn load_listing(ctx: AppContext) {
    ctx.session.update(Session::begin_listing);

    let (source, timeout_ms) = ctx
        .config
        .with_value(|config| (config.source.clone(), config.fetch_timeout_ms));

    spawn_local(async move {
        let url = source.listing_url();
        log::info!("loading listing from {}", url);

        let result = match fetch_listing(&url, timeout_ms).await {
            Ok(body) => source.parse_listing(&body),
            Err(e) => Err(ListingError::from(e)),
        };

        match &result {
            Ok(files) => log::info!("listed {} markdown files", files.len()),
            Err(e) => log::error!("{}", e),
        }
        ctx.session.try_update(|session| session.finish_listing(result));
    });
}

/// Select `file` and fetch its content.
///
/// Re-selecting the current file fetches again.
pub fn select_file(ctx: AppContext, file: FileEntry) {
    let Some(ticket) = ctx.session.try_update(|session| session.select(file)) else {
        return;
    };
    let timeout_ms = ctx.config.with_value(|config| config.fetch_timeout_ms);

    spawn_local(async move {
        let result = fetch_content(&ticket.locator, timeout_ms).await;
        ctx.session
            .try_update(|session| session.complete(ticket, result));
    });
}
