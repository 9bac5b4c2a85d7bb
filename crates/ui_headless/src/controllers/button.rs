//! Button controller.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use ui_host::{EventControl, KeyInput};

use super::{fire, Callback, ComponentState};
use crate::{
    attributes::AttributeMap,
    tokens::{ButtonVariant, Size},
    UiContext,
};

/// Button configuration. Every field is optional when decoded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
    /// Explicit DOM id; generated as `button-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Disables interaction.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub disabled: bool,
    /// Visual variant.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub variant: ButtonVariant,
    /// Size token.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub size: Size,
    /// Shows the busy state and disables interaction.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub loading: bool,
    /// Accessible label announced while loading.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub loading_text: Option<String>,
    /// `aria-label` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_label: Option<String>,
    /// `aria-describedby` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_described_by: Option<String>,
}

/// Caller hooks for [`ButtonController`].
#[derive(Clone, Default)]
pub struct ButtonCallbacks {
    /// Activation by pointer click or Enter/Space.
    pub on_click: Option<Callback>,
    /// Every key press that reaches an enabled button.
    pub on_key_down: Option<Rc<dyn Fn(&KeyInput)>>,
    /// Focus gained.
    pub on_focus: Option<Callback>,
    /// Focus lost.
    pub on_blur: Option<Callback>,
}

/// Snapshot of button state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    /// Shared interaction state; `disabled` already includes `loading`.
    #[serde(flatten)]
    pub base: ComponentState,
    /// Busy state.
    pub loading: bool,
    /// Visual variant.
    pub variant: ButtonVariant,
    /// Size token.
    pub size: Size,
}

impl ButtonState {
    /// Token for `data-state`.
    pub fn data_state(&self) -> &'static str {
        if self.loading {
            "loading"
        } else if self.base.pressed {
            "pressed"
        } else {
            "idle"
        }
    }
}

/// DOM attributes for the button element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonProps {
    /// `id`.
    pub id: String,
    /// `type`; always `button` so the control never submits a form.
    pub button_type: &'static str,
    /// `disabled`.
    pub disabled: bool,
    /// `aria-pressed`.
    pub aria_pressed: bool,
    /// `aria-busy`.
    pub aria_busy: bool,
    /// `aria-label`; the loading text replaces it while loading.
    pub aria_label: Option<String>,
    /// `aria-describedby`.
    pub aria_described_by: Option<String>,
    /// `data-state`.
    pub data_state: &'static str,
    /// `data-variant`.
    pub data_variant: &'static str,
    /// `data-size`.
    pub data_size: &'static str,
}

impl ButtonProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.id.as_str())
            .set("type", self.button_type)
            .set_flag("disabled", self.disabled)
            .set_bool("aria-pressed", self.aria_pressed)
            .set_bool("aria-busy", self.aria_busy)
            .set_opt("aria-label", self.aria_label.as_deref())
            .set_opt("aria-describedby", self.aria_described_by.as_deref())
            .set("data-state", self.data_state)
            .set("data-variant", self.data_variant)
            .set("data-size", self.data_size);
        attrs
    }
}

struct ButtonInner {
    config: ButtonConfig,
    callbacks: ButtonCallbacks,
    disabled_by_config: Cell<bool>,
    state: RefCell<ButtonState>,
}

/// Headless button: pressed/hover/focus tracking, keyboard activation and
/// disabled/loading gating.
#[derive(Clone)]
pub struct ButtonController {
    inner: Rc<ButtonInner>,
}

impl ButtonController {
    /// Creates a button controller.
    pub fn new(ctx: &UiContext, config: ButtonConfig, callbacks: ButtonCallbacks) -> Self {
        let id = ctx.ids().resolve(config.id.as_deref(), "button");
        let state = ButtonState {
            base: ComponentState::new(id, config.disabled || config.loading),
            loading: config.loading,
            variant: config.variant,
            size: config.size,
        };
        Self {
            inner: Rc::new(ButtonInner {
                disabled_by_config: Cell::new(config.disabled),
                config,
                callbacks,
                state: RefCell::new(state),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ButtonState {
        self.inner.state.borrow().clone()
    }

    /// DOM attributes for the current state.
    pub fn props(&self) -> ButtonProps {
        let state = self.inner.state.borrow();
        let aria_label = match (&self.inner.config.loading_text, state.loading) {
            (Some(text), true) => Some(text.clone()),
            _ => self.inner.config.aria_label.clone(),
        };
        ButtonProps {
            id: state.base.id.clone(),
            button_type: "button",
            disabled: state.base.disabled,
            aria_pressed: state.base.pressed,
            aria_busy: state.loading,
            aria_label,
            aria_described_by: self.inner.config.aria_described_by.clone(),
            data_state: state.data_state(),
            data_variant: state.variant.token(),
            data_size: state.size.token(),
        }
    }

    /// Returns whether interaction is currently suppressed.
    pub fn is_disabled(&self) -> bool {
        self.inner.state.borrow().base.disabled
    }

    /// Sets the busy state. Loading also disables the button.
    pub fn set_loading(&self, loading: bool) {
        let mut state = self.inner.state.borrow_mut();
        state.loading = loading;
        state.base.disabled = self.inner.disabled_by_config.get() || loading;
        if state.base.disabled {
            state.base.pressed = false;
        }
    }

    /// Sets the explicit disabled flag; loading keeps the button disabled.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.disabled_by_config.set(disabled);
        let mut state = self.inner.state.borrow_mut();
        state.base.disabled = disabled || state.loading;
        if state.base.disabled {
            state.base.pressed = false;
        }
    }

    /// Click handler. A disabled button swallows the click.
    pub fn on_click(&self) -> EventControl {
        if self.is_disabled() {
            return EventControl::PREVENT;
        }
        fire(&self.inner.callbacks.on_click);
        EventControl::PASS
    }

    /// Keydown handler. Enter and Space press and activate the button.
    pub fn on_key_down(&self, input: &KeyInput) -> EventControl {
        if self.is_disabled() {
            return EventControl::PREVENT;
        }

        let mut control = EventControl::PASS;
        if input.key.is_activation() {
            {
                let mut state = self.inner.state.borrow_mut();
                state.base.pressed = true;
                state.base.focused = true;
            }
            self.on_click();
            control = EventControl::PREVENT;
        }

        if let Some(on_key_down) = &self.inner.callbacks.on_key_down {
            on_key_down(input);
        }
        control
    }

    /// Keyup handler. Releasing Enter or Space clears the pressed state.
    pub fn on_key_up(&self, input: &KeyInput) {
        if input.key.is_activation() {
            self.inner.state.borrow_mut().base.pressed = false;
        }
    }

    /// Focus handler.
    pub fn on_focus(&self) {
        self.inner.state.borrow_mut().base.focused = true;
        fire(&self.inner.callbacks.on_focus);
    }

    /// Blur handler; also releases a held press.
    pub fn on_blur(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.base.focused = false;
            state.base.pressed = false;
        }
        fire(&self.inner.callbacks.on_blur);
    }

    /// Pointer entered.
    pub fn on_mouse_enter(&self) {
        self.inner.state.borrow_mut().base.hovered = true;
    }

    /// Pointer left; also releases a held press.
    pub fn on_mouse_leave(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.base.hovered = false;
        state.base.pressed = false;
    }

    /// Pointer pressed. Pressing focuses the button.
    pub fn on_mouse_down(&self) {
        let mut state = self.inner.state.borrow_mut();
        if !state.base.disabled {
            state.base.pressed = true;
            state.base.focused = true;
        }
    }

    /// Pointer released.
    pub fn on_mouse_up(&self) {
        self.inner.state.borrow_mut().base.pressed = false;
    }
}

impl std::fmt::Debug for ButtonController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonController")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
