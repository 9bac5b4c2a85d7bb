//! Leptos bindings for the headless controllers.
//!
//! Each component owns one controller, forwards DOM events to it and
//! re-renders from the controller's props after every event. Styling comes
//! from `ui_style`; DOM effects (focus, scroll lock, focus traps) go through
//! the `ui_host_web` environment supplied by [`UiProvider`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod context;
mod controls;
mod events;
mod overlays;

pub use context::{use_ui_context, UiProvider};
pub use controls::{Button, TextField};
pub use overlays::Modal;
