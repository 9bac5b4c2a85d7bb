//! Open/closed toggle behind collapsible sections, popovers and menus.

use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

use super::{fire, Callback};
use crate::{attributes::AttributeMap, UiContext};

/// Disclosure configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisclosureConfig {
    /// Explicit id of the disclosed content; generated as `disclosure-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Start open.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub initial_open: bool,
}

/// Caller hooks for [`DisclosureController`].
#[derive(Clone, Default)]
pub struct DisclosureCallbacks {
    /// Fired on a closed → open transition.
    pub on_open: Option<Callback>,
    /// Fired on an open → closed transition.
    pub on_close: Option<Callback>,
    /// Fired with the new value on every transition.
    pub on_toggle: Option<Rc<dyn Fn(bool)>>,
}

/// Attributes for the element that toggles the disclosure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureTriggerProps {
    /// `aria-expanded`.
    pub aria_expanded: bool,
    /// `aria-controls`.
    pub aria_controls: String,
    /// `data-state`.
    pub data_state: &'static str,
}

impl DisclosureTriggerProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set_bool("aria-expanded", self.aria_expanded)
            .set("aria-controls", self.aria_controls.as_str())
            .set("data-state", self.data_state);
        attrs
    }
}

/// Attributes for the disclosed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureContentProps {
    /// `id`.
    pub id: String,
    /// `hidden`.
    pub hidden: bool,
    /// `data-state`.
    pub data_state: &'static str,
}

impl DisclosureContentProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.id.as_str())
            .set_flag("hidden", self.hidden)
            .set("data-state", self.data_state);
        attrs
    }
}

struct DisclosureInner {
    id: String,
    open: Cell<bool>,
    callbacks: DisclosureCallbacks,
}

/// Boolean open state with transition callbacks.
#[derive(Clone)]
pub struct DisclosureController {
    inner: Rc<DisclosureInner>,
}

impl DisclosureController {
    /// Creates a disclosure controller.
    pub fn new(ctx: &UiContext, config: DisclosureConfig, callbacks: DisclosureCallbacks) -> Self {
        Self {
            inner: Rc::new(DisclosureInner {
                id: ctx.ids().resolve(config.id.as_deref(), "disclosure"),
                open: Cell::new(config.initial_open),
                callbacks,
            }),
        }
    }

    /// Id of the disclosed content.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Returns whether the disclosure is open.
    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Sets the open state. Callbacks fire only when the value changes.
    pub fn set_open(&self, open: bool) {
        if self.inner.open.replace(open) == open {
            return;
        }
        if open {
            fire(&self.inner.callbacks.on_open);
        } else {
            fire(&self.inner.callbacks.on_close);
        }
        if let Some(on_toggle) = &self.inner.callbacks.on_toggle {
            on_toggle(open);
        }
    }

    /// Opens the disclosure.
    pub fn open(&self) {
        self.set_open(true);
    }

    /// Closes the disclosure.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Flips the open state.
    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    fn data_state(&self) -> &'static str {
        if self.is_open() {
            "open"
        } else {
            "closed"
        }
    }

    /// Attributes for the toggling element.
    pub fn trigger_props(&self) -> DisclosureTriggerProps {
        DisclosureTriggerProps {
            aria_expanded: self.is_open(),
            aria_controls: self.inner.id.clone(),
            data_state: self.data_state(),
        }
    }

    /// Attributes for the disclosed content.
    pub fn content_props(&self) -> DisclosureContentProps {
        DisclosureContentProps {
            id: self.inner.id.clone(),
            hidden: !self.is_open(),
            data_state: self.data_state(),
        }
    }
}

impl std::fmt::Debug for DisclosureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureController")
            .field("id", &self.inner.id)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn transitions_fire_callbacks_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (open_log, close_log, toggle_log) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
        let disclosure = DisclosureController::new(
            &UiContext::headless(),
            DisclosureConfig::default(),
            DisclosureCallbacks {
                on_open: Some(Rc::new(move || open_log.borrow_mut().push("open".to_string()))),
                on_close: Some(Rc::new(move || close_log.borrow_mut().push("close".to_string()))),
                on_toggle: Some(Rc::new(move |open| toggle_log.borrow_mut().push(format!("toggle:{open}")))),
            },
        );

        disclosure.open();
        disclosure.open();
        disclosure.toggle();
        disclosure.close();
        assert_eq!(
            *log.borrow(),
            vec![
                "open".to_string(),
                "toggle:true".to_string(),
                "close".to_string(),
                "toggle:false".to_string(),
            ]
        );
    }

    #[test]
    fn props_link_trigger_and_content() {
        let disclosure = DisclosureController::new(
            &UiContext::headless(),
            DisclosureConfig {
                initial_open: true,
                ..DisclosureConfig::default()
            },
            DisclosureCallbacks::default(),
        );
        assert_eq!(disclosure.id(), "disclosure-1");
        let trigger = disclosure.trigger_props().to_attributes();
        assert_eq!(trigger.get("aria-expanded"), Some("true"));
        assert_eq!(trigger.get("aria-controls"), Some("disclosure-1"));

        disclosure.toggle();
        let content = disclosure.content_props().to_attributes();
        assert!(content.contains("hidden"));
        assert_eq!(content.get("data-state"), Some("closed"));
    }
}
