mod actions;
mod app;
mod components;
mod config;
mod error;
mod utils;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    let Some(root) = utils::dom::element_by_id("app") else {
        log::error!("missing #app mount point");
        return;
    };

    mount_to(root, App).forget();
}
