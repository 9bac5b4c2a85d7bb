//! Browser (`wasm32`) implementation of the [`ui_host::UiEnvironment`] contract.
//!
//! [`WebUiEnvironment`] maps opaque [`ui_host::ElementHandle`]s onto live DOM
//! elements, installs keydown listeners as `wasm-bindgen` closures and runs
//! next-tick tasks through `setTimeout(0)`. Native builds compile the same API
//! with inert behavior so host crates and their tests build everywhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[cfg(target_arch = "wasm32")]
mod browser;
pub mod handles;
#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;

#[cfg(target_arch = "wasm32")]
pub use browser::WebUiEnvironment;
pub use handles::HandleTable;
#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm::WebUiEnvironment;

/// CSS selector matching the elements a focus trap cycles through.
pub const FOCUSABLE_SELECTOR: &str = concat!(
    "a[href], ",
    "button:not([disabled]), ",
    "input:not([disabled]), ",
    "select:not([disabled]), ",
    "textarea:not([disabled]), ",
    "[tabindex]:not([tabindex=\"-1\"]), ",
    "[contenteditable=\"true\"]"
);
