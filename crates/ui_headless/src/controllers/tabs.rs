//! Tabs controller: selection, roving tabindex and arrow-key navigation.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};
use ui_host::{EventControl, KeyInput, UiEnvironment};

use super::{fire_with, StrCallback};
use crate::{
    attributes::AttributeMap,
    navigation::{resolve_navigation_filtered, NavigationAction, NavigationOptions},
    tokens::Orientation,
    UiContext,
};

/// One tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabItem {
    /// Item key, unique within the tab list.
    pub id: String,
    /// Visible label.
    pub label: String,
    /// Skipped by keyboard navigation and not selectable.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub disabled: bool,
}

impl TabItem {
    /// Creates an enabled tab.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the tab disabled.
    pub fn disabled(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }
}

/// Whether moving focus between tabs also selects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabActivation {
    /// Arrow keys select the tab they move to.
    #[default]
    Automatic,
    /// Arrow keys move focus only; Enter/Space select.
    Manual,
}

/// Tabs configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabsConfig {
    /// Explicit root id; generated as `tabs-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Tabs in display order.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub items: Vec<TabItem>,
    /// Initially selected tab; the first enabled tab when absent or unknown.
    #[serde(alias = "value", deserialize_with = "crate::config::lenient")]
    pub selected: Option<String>,
    /// Axis of the tab list.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub orientation: Orientation,
    /// Wrap keyboard navigation at either end.
    #[serde(rename = "loop", deserialize_with = "crate::config::lenient_true")]
    pub loop_focus: bool,
    /// Selection follows focus or waits for Enter/Space.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub activation: TabActivation,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            selected: None,
            orientation: Orientation::Horizontal,
            loop_focus: true,
            activation: TabActivation::Automatic,
        }
    }
}

/// Caller hooks for [`TabsController`].
#[derive(Clone, Default)]
pub struct TabsCallbacks {
    /// Fired with the newly selected tab id.
    pub on_change: Option<StrCallback>,
}

struct TabsInner {
    env: Rc<dyn UiEnvironment>,
    id: String,
    config: TabsConfig,
    callbacks: TabsCallbacks,
    selected: RefCell<Option<String>>,
}

/// Headless tab list.
#[derive(Clone)]
pub struct TabsController {
    inner: Rc<TabsInner>,
}

impl TabsController {
    /// Creates a tabs controller.
    pub fn new(ctx: &UiContext, config: TabsConfig, callbacks: TabsCallbacks) -> Self {
        let id = ctx.ids().resolve(config.id.as_deref(), "tabs");
        let selected = config
            .selected
            .as_deref()
            .filter(|wanted| {
                config
                    .items
                    .iter()
                    .any(|item| item.id == *wanted && !item.disabled)
            })
            .map(str::to_string)
            .or_else(|| {
                config
                    .items
                    .iter()
                    .find(|item| !item.disabled)
                    .map(|item| item.id.clone())
            });
        Self {
            inner: Rc::new(TabsInner {
                env: Rc::clone(ctx.env()),
                id,
                config,
                callbacks,
                selected: RefCell::new(selected),
            }),
        }
    }

    /// Tabs in display order.
    pub fn items(&self) -> &[TabItem] {
        &self.inner.config.items
    }

    /// Currently selected tab id.
    pub fn selected(&self) -> Option<String> {
        self.inner.selected.borrow().clone()
    }

    /// Returns whether `tab` is selected.
    pub fn is_selected(&self, tab: &str) -> bool {
        self.inner.selected.borrow().as_deref() == Some(tab)
    }

    /// DOM id of the tab element for item `tab`.
    pub fn tab_dom_id(&self, tab: &str) -> String {
        format!("{}-tab-{tab}", self.inner.id)
    }

    /// DOM id of the panel element for item `tab`.
    pub fn panel_dom_id(&self, tab: &str) -> String {
        format!("{}-panel-{tab}", self.inner.id)
    }

    fn index_of(&self, tab: &str) -> Option<usize> {
        self.items().iter().position(|item| item.id == tab)
    }

    /// Selects `tab`. Unknown and disabled tabs are refused; reselecting the
    /// current tab does not notify.
    pub fn select(&self, tab: &str) -> bool {
        let Some(index) = self.index_of(tab) else {
            return false;
        };
        if self.items()[index].disabled {
            return false;
        }
        if self.is_selected(tab) {
            return true;
        }
        *self.inner.selected.borrow_mut() = Some(tab.to_string());
        fire_with(&self.inner.callbacks.on_change, tab);
        true
    }

    /// Click handler for a tab.
    pub fn on_tab_click(&self, tab: &str) {
        self.select(tab);
    }

    /// Keydown handler for the focused tab `focused_tab`.
    pub fn on_key_down(&self, input: &KeyInput, focused_tab: &str) -> EventControl {
        let items = self.items();
        let Some(current) = self.index_of(focused_tab) else {
            return EventControl::PASS;
        };
        let options = NavigationOptions {
            loop_focus: self.inner.config.loop_focus,
            orientation: self.inner.config.orientation,
            ..NavigationOptions::default()
        };
        let outcome =
            resolve_navigation_filtered(input, items.len(), current, options, |index| {
                items[index].disabled
            });

        match outcome.action {
            NavigationAction::Move(index) => {
                let tab = &items[index].id;
                if let Some(element) = self.inner.env.element_by_id(&self.tab_dom_id(tab)) {
                    self.inner.env.focus(element);
                }
                if self.inner.config.activation == TabActivation::Automatic {
                    self.select(tab);
                }
            }
            NavigationAction::Select(index) => {
                self.select(&items[index].id);
            }
            NavigationAction::None => {}
        }
        outcome.control
    }

    /// Attributes for the tab list element.
    pub fn list_props(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.inner.id.as_str())
            .set("role", "tablist")
            .set("aria-orientation", self.inner.config.orientation.token());
        attrs
    }

    /// Attributes for the tab element of item `tab`.
    pub fn tab_props(&self, tab: &str) -> AttributeMap {
        let selected = self.is_selected(tab);
        let disabled = self
            .index_of(tab)
            .is_some_and(|index| self.items()[index].disabled);
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.tab_dom_id(tab))
            .set("role", "tab")
            .set("type", "button")
            .set_bool("aria-selected", selected)
            .set("aria-controls", self.panel_dom_id(tab))
            .set_flag("disabled", disabled)
            .set("tabindex", if selected { "0" } else { "-1" })
            .set("data-state", if selected { "active" } else { "inactive" });
        if disabled {
            attrs.set_bool("aria-disabled", true);
        }
        attrs
    }

    /// Attributes for the panel element of item `tab`.
    pub fn panel_props(&self, tab: &str) -> AttributeMap {
        let selected = self.is_selected(tab);
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.panel_dom_id(tab))
            .set("role", "tabpanel")
            .set("aria-labelledby", self.tab_dom_id(tab))
            .set("tabindex", "0")
            .set_flag("hidden", !selected)
            .set("data-state", if selected { "active" } else { "inactive" });
        attrs
    }
}

impl std::fmt::Debug for TabsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabsController")
            .field("id", &self.inner.id)
            .field("selected", &*self.inner.selected.borrow())
            .finish_non_exhaustive()
    }
}
