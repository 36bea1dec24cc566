//! UI components built with Leptos.
//!
//! - [`Shell`] - Page frame: header, theme toggle, two panels
//! - [`browser`] - Search bar and file list
//! - [`viewer`] - Selected file, markdown rendering, code blocks
//! - [`icons`] - Centralized icon definitions

pub mod browser;
pub mod icons;
mod shell;
pub mod viewer;

pub use shell::Shell;
