//! Accordion controller: single or multiple expanded sections.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};
use ui_host::{EventControl, KeyInput, UiEnvironment};

use crate::{
    attributes::AttributeMap,
    navigation::{resolve_navigation_filtered, NavigationAction, NavigationOptions},
    UiContext,
};

/// One accordion section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionItem {
    /// Item key, unique within the accordion.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Cannot be toggled and is skipped by keyboard navigation.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub disabled: bool,
    /// Expanded on construction.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub default_open: bool,
}

impl AccordionItem {
    /// Creates an enabled, collapsed section.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// How many sections may be expanded at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccordionMode {
    /// At most one section.
    #[default]
    Single,
    /// Any number of sections.
    Multiple,
}

/// Accordion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionConfig {
    /// Explicit root id; generated as `accordion-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Sections in display order.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub items: Vec<AccordionItem>,
    /// Expansion mode.
    #[serde(rename = "type", deserialize_with = "crate::config::lenient")]
    pub mode: AccordionMode,
    /// In single mode, whether the open section can be collapsed directly.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub collapsible: bool,
    /// Sections expanded on construction, in addition to `default_open` items.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub default_value: Vec<String>,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            mode: AccordionMode::Single,
            collapsible: true,
            default_value: Vec::new(),
        }
    }
}

/// Caller hooks for [`AccordionController`].
#[derive(Clone, Default)]
pub struct AccordionCallbacks {
    /// Fired with the expanded section ids (in item order) after every change.
    pub on_change: Option<Rc<dyn Fn(&[String])>>,
}

struct AccordionInner {
    env: Rc<dyn UiEnvironment>,
    id: String,
    config: AccordionConfig,
    callbacks: AccordionCallbacks,
    expanded: RefCell<Vec<String>>,
}

/// Headless accordion.
#[derive(Clone)]
pub struct AccordionController {
    inner: Rc<AccordionInner>,
}

impl AccordionController {
    /// Creates an accordion controller. In single mode only the first
    /// initially expanded section stays open.
    pub fn new(ctx: &UiContext, config: AccordionConfig, callbacks: AccordionCallbacks) -> Self {
        let id = ctx.ids().resolve(config.id.as_deref(), "accordion");
        let mut expanded: Vec<String> = config
            .items
            .iter()
            .filter(|item| item.default_open || config.default_value.contains(&item.id))
            .map(|item| item.id.clone())
            .collect();
        if config.mode == AccordionMode::Single {
            expanded.truncate(1);
        }
        Self {
            inner: Rc::new(AccordionInner {
                env: Rc::clone(ctx.env()),
                id,
                config,
                callbacks,
                expanded: RefCell::new(expanded),
            }),
        }
    }

    /// Sections in display order.
    pub fn items(&self) -> &[AccordionItem] {
        &self.inner.config.items
    }

    /// Expanded section ids in item order.
    pub fn expanded(&self) -> Vec<String> {
        self.inner.expanded.borrow().clone()
    }

    /// Returns whether section `item` is expanded.
    pub fn is_expanded(&self, item: &str) -> bool {
        self.inner.expanded.borrow().iter().any(|open| open == item)
    }

    fn item(&self, item: &str) -> Option<&AccordionItem> {
        self.items().iter().find(|candidate| candidate.id == item)
    }

    /// DOM id of the header button for `item`.
    pub fn trigger_dom_id(&self, item: &str) -> String {
        format!("{}-trigger-{item}", self.inner.id)
    }

    /// DOM id of the content region for `item`.
    pub fn panel_dom_id(&self, item: &str) -> String {
        format!("{}-panel-{item}", self.inner.id)
    }

    /// Expands `item`, collapsing the others in single mode. Returns whether
    /// anything changed.
    pub fn expand(&self, item: &str) -> bool {
        if self.item(item).map_or(true, |found| found.disabled) || self.is_expanded(item) {
            return false;
        }
        {
            let mut expanded = self.inner.expanded.borrow_mut();
            if self.inner.config.mode == AccordionMode::Single {
                expanded.clear();
            }
            expanded.push(item.to_string());
            let order = |id: &String| self.items().iter().position(|it| it.id == *id);
            expanded.sort_by_key(order);
        }
        self.notify();
        true
    }

    /// Collapses `item`. A single, non-collapsible accordion keeps its open
    /// section. Returns whether anything changed.
    pub fn collapse(&self, item: &str) -> bool {
        if self.item(item).map_or(true, |found| found.disabled) || !self.is_expanded(item) {
            return false;
        }
        if self.inner.config.mode == AccordionMode::Single && !self.inner.config.collapsible {
            return false;
        }
        self.inner.expanded.borrow_mut().retain(|open| open != item);
        self.notify();
        true
    }

    /// Toggles `item`.
    pub fn toggle(&self, item: &str) -> bool {
        if self.is_expanded(item) {
            self.collapse(item)
        } else {
            self.expand(item)
        }
    }

    fn notify(&self) {
        if let Some(on_change) = &self.inner.callbacks.on_change {
            let expanded = self.expanded();
            on_change(&expanded);
        }
    }

    /// Keydown handler for the focused header of `item`: Up/Down/Home/End
    /// move between headers, Enter/Space toggle.
    pub fn on_key_down(&self, input: &KeyInput, item: &str) -> EventControl {
        let items = self.items();
        let Some(current) = items.iter().position(|candidate| candidate.id == item) else {
            return EventControl::PASS;
        };
        let outcome = resolve_navigation_filtered(
            input,
            items.len(),
            current,
            NavigationOptions::vertical(),
            |i| items[i].disabled,
        );
        match outcome.action {
            NavigationAction::Move(index) => {
                let target = self.trigger_dom_id(&items[index].id);
                if let Some(element) = self.inner.env.element_by_id(&target) {
                    self.inner.env.focus(element);
                }
            }
            NavigationAction::Select(index) => {
                self.toggle(&items[index].id);
            }
            NavigationAction::None => {}
        }
        outcome.control
    }

    /// Attributes for the header button of `item`.
    pub fn trigger_props(&self, item: &str) -> AttributeMap {
        let expanded = self.is_expanded(item);
        let disabled = self.item(item).is_some_and(|found| found.disabled);
        let locked = expanded
            && self.inner.config.mode == AccordionMode::Single
            && !self.inner.config.collapsible;
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.trigger_dom_id(item))
            .set("type", "button")
            .set_bool("aria-expanded", expanded)
            .set("aria-controls", self.panel_dom_id(item))
            .set_flag("disabled", disabled)
            .set("data-state", if expanded { "open" } else { "closed" });
        if disabled || locked {
            attrs.set_bool("aria-disabled", true);
        }
        attrs
    }

    /// Attributes for the content region of `item`.
    pub fn panel_props(&self, item: &str) -> AttributeMap {
        let expanded = self.is_expanded(item);
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.panel_dom_id(item))
            .set("role", "region")
            .set("aria-labelledby", self.trigger_dom_id(item))
            .set_flag("hidden", !expanded)
            .set("data-state", if expanded { "open" } else { "closed" });
        attrs
    }
}

impl std::fmt::Debug for AccordionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccordionController")
            .field("id", &self.inner.id)
            .field("expanded", &*self.inner.expanded.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ui_host::{ElementSpec, Key, MemoryUiEnvironment};

    use super::*;

    fn faq(mode: AccordionMode, collapsible: bool) -> AccordionController {
        let mut shipping = AccordionItem::new("shipping", "Shipping");
        shipping.default_open = true;
        let mut legacy = AccordionItem::new("legacy", "Legacy");
        legacy.disabled = true;
        AccordionController::new(
            &UiContext::headless(),
            AccordionConfig {
                id: Some("faq".to_string()),
                items: vec![
                    shipping,
                    AccordionItem::new("returns", "Returns"),
                    legacy,
                    AccordionItem::new("warranty", "Warranty"),
                ],
                mode,
                collapsible,
                default_value: vec!["warranty".to_string()],
            },
            AccordionCallbacks::default(),
        )
    }

    #[test]
    fn single_mode_keeps_one_section_open() {
        let accordion = faq(AccordionMode::Single, true);
        assert_eq!(accordion.expanded(), vec!["shipping".to_string()]);
        assert!(accordion.toggle("returns"));
        assert_eq!(accordion.expanded(), vec!["returns".to_string()]);
        assert!(accordion.toggle("returns"));
        assert!(accordion.expanded().is_empty());
    }

    #[test]
    fn non_collapsible_single_mode_refuses_to_close() {
        let accordion = faq(AccordionMode::Single, false);
        assert!(!accordion.collapse("shipping"));
        assert!(accordion.is_expanded("shipping"));
        assert_eq!(accordion.trigger_props("shipping").get("aria-disabled"), Some("true"));
        assert!(accordion.expand("returns"));
        assert!(!accordion.is_expanded("shipping"));
    }

    #[test]
    fn multiple_mode_keeps_item_order() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let accordion = AccordionController::new(
            &UiContext::headless(),
            AccordionConfig {
                items: vec![
                    AccordionItem::new("a", "A"),
                    AccordionItem::new("b", "B"),
                    AccordionItem::new("c", "C"),
                ],
                mode: AccordionMode::Multiple,
                ..AccordionConfig::default()
            },
            AccordionCallbacks {
                on_change: Some(Rc::new(move |open: &[String]| sink.borrow_mut().push(open.to_vec()))),
            },
        );
        accordion.expand("c");
        accordion.expand("a");
        assert_eq!(accordion.expanded(), vec!["a".to_string(), "c".to_string()]);
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn disabled_sections_do_not_toggle() {
        let accordion = faq(AccordionMode::Multiple, true);
        assert_eq!(
            accordion.expanded(),
            vec!["shipping".to_string(), "warranty".to_string()]
        );
        assert!(!accordion.toggle("legacy"));
        assert!(!accordion.toggle("unknown"));
        let props = accordion.trigger_props("legacy");
        assert!(props.contains("disabled"));
    }

    #[test]
    fn keyboard_moves_between_headers_and_toggles() {
        let env = MemoryUiEnvironment::new();
        for id in ["a", "b", "c"] {
            env.insert(None, ElementSpec::new("button").id(format!("menu-trigger-{id}")));
        }
        let accordion = AccordionController::new(
            &UiContext::new(Rc::new(env.clone())),
            AccordionConfig {
                id: Some("menu".to_string()),
                items: vec![
                    AccordionItem::new("a", "A"),
                    AccordionItem::new("b", "B"),
                    AccordionItem::new("c", "C"),
                ],
                ..AccordionConfig::default()
            },
            AccordionCallbacks::default(),
        );
        let control = accordion.on_key_down(&KeyInput::plain(Key::ArrowUp), "a");
        assert!(control.prevent_default);
        assert_eq!(env.active_element(), env.element_by_id("menu-trigger-c"));

        accordion.on_key_down(&KeyInput::plain(Key::Space), "c");
        assert!(accordion.is_expanded("c"));
        assert!(accordion.on_key_down(&KeyInput::plain(Key::ArrowLeft), "c").is_pass());
    }

    #[test]
    fn panels_reference_their_triggers() {
        let accordion = faq(AccordionMode::Single, true);
        let panel = accordion.panel_props("shipping");
        assert_eq!(panel.get("role"), Some("region"));
        assert_eq!(panel.get("aria-labelledby"), Some("faq-trigger-shipping"));
        assert!(!panel.contains("hidden"));
        assert!(accordion.panel_props("returns").contains("hidden"));
    }
}
