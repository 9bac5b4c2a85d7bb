//! Headless component controllers.
//!
//! A controller is a cheap `Clone` handle over shared state. It is built from a
//! [`crate::UiContext`], a serde-decodable config and a callbacks struct, and
//! exposes `state()`, `props()` (recomputed from current state on every call)
//! and event handlers that return [`ui_host::EventControl`] where the host
//! event has a default action worth suppressing.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub mod accordion;
pub mod button;
pub mod disclosure;
pub mod input;
pub mod modal;
pub mod slider;
pub mod tabs;

/// Callback without arguments.
pub type Callback = Rc<dyn Fn()>;

/// Callback receiving a string value (input text, tab or item id).
pub type StrCallback = Rc<dyn Fn(&str)>;

/// Interaction state shared by every component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentState {
    /// Stable DOM id, fixed at construction.
    pub id: String,
    /// Whether interaction is suppressed.
    pub disabled: bool,
    /// Whether the component has keyboard focus.
    pub focused: bool,
    /// Whether a pointer or activation key is held down.
    pub pressed: bool,
    /// Whether the pointer is over the component.
    pub hovered: bool,
}

impl ComponentState {
    pub(crate) fn new(id: String, disabled: bool) -> Self {
        Self {
            id,
            disabled,
            ..Self::default()
        }
    }
}

pub(crate) fn fire(callback: &Option<Callback>) {
    if let Some(callback) = callback {
        callback();
    }
}

pub(crate) fn fire_with<T: ?Sized>(callback: &Option<Rc<dyn Fn(&T)>>, value: &T) {
    if let Some(callback) = callback {
        callback(value);
    }
}
