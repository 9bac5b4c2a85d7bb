//! Modal dialog controller: open/close lifecycle, scroll lock, focus trap
//! and focus restoration.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};
use ui_host::{ElementHandle, EventControl, Key, KeyInput, TaskId, UiEnvironment};

use super::{fire, Callback, ComponentState};
use crate::{attributes::AttributeMap, focus::FocusTrap, UiContext};

/// Modal configuration. Every field is optional when decoded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Explicit DOM id; generated as `modal-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Start open. The open side effects apply but `on_open` does not fire.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub open: bool,
    /// Dialog title.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub title: String,
    /// Dialog description.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub description: String,
    /// Whether the dialog may be closed at all.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub closable: bool,
    /// Render a backdrop overlay.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub backdrop: bool,
    /// Close on Escape.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub close_on_escape: bool,
    /// Close on a click that lands on the overlay itself.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub close_on_backdrop: bool,
    /// Lock page scrolling while open.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub prevent_scroll: bool,
    /// Trap focus inside the dialog on the tick after opening.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub auto_focus: bool,
    /// Return focus to the previously focused element on close.
    #[serde(deserialize_with = "crate::config::lenient_true")]
    pub restore_focus: bool,
    /// `aria-label` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_label: Option<String>,
    /// `aria-describedby` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_described_by: Option<String>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            id: None,
            open: false,
            title: String::new(),
            description: String::new(),
            closable: true,
            backdrop: true,
            close_on_escape: true,
            close_on_backdrop: true,
            prevent_scroll: true,
            auto_focus: true,
            restore_focus: true,
            aria_label: None,
            aria_described_by: None,
        }
    }
}

/// Caller hooks for [`ModalController`].
#[derive(Clone, Default)]
pub struct ModalCallbacks {
    /// Fired after a closed dialog opened.
    pub on_open: Option<Callback>,
    /// Fired after an open dialog closed.
    pub on_close: Option<Callback>,
    /// Every key press that reaches the dialog.
    pub on_key_down: Option<Rc<dyn Fn(&KeyInput)>>,
}

/// Snapshot of modal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    /// Shared interaction state.
    #[serde(flatten)]
    pub base: ComponentState,
    /// Whether the dialog is open.
    pub open: bool,
    /// Dialog title.
    pub title: String,
    /// Dialog description.
    pub description: String,
    /// Whether closing is allowed.
    pub closable: bool,
    /// Whether a backdrop is rendered.
    pub backdrop: bool,
}

impl ModalState {
    /// Token for `data-state`.
    pub fn data_state(&self) -> &'static str {
        if self.open {
            "open"
        } else {
            "closed"
        }
    }
}

/// DOM attributes for the dialog element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalProps {
    /// `id`.
    pub id: String,
    /// `role`.
    pub role: &'static str,
    /// `aria-modal`.
    pub aria_modal: bool,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-describedby`.
    pub aria_described_by: Option<String>,
    /// `data-state`.
    pub data_state: &'static str,
    /// `tabindex`; the dialog is focusable programmatically only.
    pub tab_index: i32,
}

impl ModalProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.id.as_str())
            .set("role", self.role)
            .set_bool("aria-modal", self.aria_modal)
            .set_opt("aria-label", self.aria_label.as_deref())
            .set_opt("aria-describedby", self.aria_described_by.as_deref())
            .set("data-state", self.data_state)
            .set("tabindex", self.tab_index.to_string());
        attrs
    }
}

/// DOM attributes for the backdrop overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOverlayProps {
    /// `data-state`.
    pub data_state: &'static str,
}

impl ModalOverlayProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.set("data-state", self.data_state);
        attrs
    }
}

#[derive(Default)]
struct ModalRuntime {
    previous_active: Option<ElementHandle>,
    trap: Option<FocusTrap>,
    pending_trap: Option<TaskId>,
}

struct ModalInner {
    env: Rc<dyn UiEnvironment>,
    config: ModalConfig,
    callbacks: ModalCallbacks,
    state: RefCell<ModalState>,
    runtime: RefCell<ModalRuntime>,
}

impl ModalInner {
    /// Applies the open side effects. Returns false when already open.
    fn enter_open(self: &Rc<Self>) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.open {
                return false;
            }
            state.open = true;
        }

        let mut runtime = self.runtime.borrow_mut();
        if self.config.restore_focus {
            runtime.previous_active = self.env.active_element();
        }
        if self.config.prevent_scroll {
            self.env.set_scroll_locked(true);
        }
        if self.config.auto_focus {
            let weak: Weak<Self> = Rc::downgrade(self);
            let task = self.env.schedule_next_tick(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.activate_trap();
                }
            }));
            runtime.pending_trap = Some(task);
        }
        true
    }

    fn activate_trap(&self) {
        let mut runtime = self.runtime.borrow_mut();
        runtime.pending_trap = None;
        let state = self.state.borrow();
        if !state.open {
            return;
        }
        match self.env.element_by_id(&state.base.id) {
            Some(container) => {
                runtime.trap = Some(FocusTrap::enable(Rc::clone(&self.env), container));
            }
            None => {
                tracing::debug!(id = %state.base.id, "modal element not mounted; focus trap skipped");
            }
        }
    }
}

impl Drop for ModalInner {
    fn drop(&mut self) {
        let runtime = self.runtime.get_mut();
        if let Some(task) = runtime.pending_trap.take() {
            self.env.cancel_task(task);
        }
        if self.state.get_mut().open && self.config.prevent_scroll {
            self.env.set_scroll_locked(false);
        }
    }
}

/// Headless modal dialog.
///
/// Opening captures the focused element, locks page scroll and schedules the
/// focus trap for the next tick. Closing cancels a pending trap activation,
/// releases the trap, unlocks scroll and restores focus, in that order.
#[derive(Clone)]
pub struct ModalController {
    inner: Rc<ModalInner>,
}

impl ModalController {
    /// Creates a modal controller.
    pub fn new(ctx: &UiContext, config: ModalConfig, callbacks: ModalCallbacks) -> Self {
        let id = ctx.ids().resolve(config.id.as_deref(), "modal");
        let state = ModalState {
            base: ComponentState::new(id, false),
            open: false,
            title: config.title.clone(),
            description: config.description.clone(),
            closable: config.closable,
            backdrop: config.backdrop,
        };
        let start_open = config.open;
        let inner = Rc::new(ModalInner {
            env: Rc::clone(ctx.env()),
            config,
            callbacks,
            state: RefCell::new(state),
            runtime: RefCell::new(ModalRuntime::default()),
        });
        if start_open {
            inner.enter_open();
        }
        Self { inner }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ModalState {
        self.inner.state.borrow().clone()
    }

    /// Returns whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    /// Returns whether a focus trap is currently installed.
    pub fn is_trapping_focus(&self) -> bool {
        self.inner
            .runtime
            .borrow()
            .trap
            .as_ref()
            .is_some_and(FocusTrap::is_active)
    }

    /// DOM attributes for the dialog element.
    pub fn props(&self) -> ModalProps {
        let state = self.inner.state.borrow();
        ModalProps {
            id: state.base.id.clone(),
            role: "dialog",
            aria_modal: true,
            aria_label: self.inner.config.aria_label.clone(),
            aria_described_by: self.inner.config.aria_described_by.clone(),
            data_state: state.data_state(),
            tab_index: -1,
        }
    }

    /// DOM attributes for the backdrop overlay.
    pub fn overlay_props(&self) -> ModalOverlayProps {
        ModalOverlayProps {
            data_state: self.inner.state.borrow().data_state(),
        }
    }

    /// Opens a closed dialog and fires `on_open`. No-op when already open.
    pub fn open(&self) {
        if self.inner.enter_open() {
            tracing::debug!(id = %self.inner.state.borrow().base.id, "modal opened");
            fire(&self.inner.callbacks.on_open);
        }
    }

    /// Closes an open, closable dialog and fires `on_close`.
    pub fn close(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.open || !state.closable {
                return;
            }
            state.open = false;
        }

        let previous = {
            let mut runtime = self.inner.runtime.borrow_mut();
            if let Some(task) = runtime.pending_trap.take() {
                self.inner.env.cancel_task(task);
            }
            if let Some(trap) = runtime.trap.take() {
                trap.disable();
            }
            runtime.previous_active.take()
        };
        if self.inner.config.prevent_scroll {
            self.inner.env.set_scroll_locked(false);
        }
        if self.inner.config.restore_focus {
            if let Some(previous) = previous {
                self.inner.env.focus(previous);
            }
        }

        tracing::debug!(id = %self.inner.state.borrow().base.id, "modal closed");
        fire(&self.inner.callbacks.on_close);
    }

    /// Opens when closed, closes when open.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Allows or forbids closing.
    pub fn set_closable(&self, closable: bool) {
        self.inner.state.borrow_mut().closable = closable;
    }

    /// Keydown handler. Escape closes when allowed; the caller hook always runs.
    pub fn on_key_down(&self, input: &KeyInput) -> EventControl {
        let mut control = EventControl::PASS;
        let closable = self.inner.state.borrow().closable;
        if input.key == Key::Escape
            && self.inner.config.close_on_escape
            && closable
            && self.is_open()
        {
            self.close();
            control = EventControl::PREVENT;
        }
        if let Some(on_key_down) = &self.inner.callbacks.on_key_down {
            on_key_down(input);
        }
        control
    }

    /// Overlay click handler. Only clicks whose target is the overlay itself
    /// (not a descendant) close the dialog.
    pub fn on_overlay_click(&self, target_is_overlay: bool) {
        let closable = self.inner.state.borrow().closable;
        if target_is_overlay && self.inner.config.close_on_backdrop && closable {
            self.close();
        }
    }
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &*self.inner.state.borrow())
            .field("trapping_focus", &self.is_trapping_focus())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;
    use ui_host::{ElementSpec, MemoryUiEnvironment};

    use super::*;

    struct Fixture {
        env: MemoryUiEnvironment,
        ctx: UiContext,
        trigger: ElementHandle,
        dialog_buttons: Vec<ElementHandle>,
        opened: Rc<Cell<u32>>,
        closed: Rc<Cell<u32>>,
    }

    impl Fixture {
        fn new() -> Self {
            let env = MemoryUiEnvironment::new();
            let trigger = env.insert(None, ElementSpec::new("button").id("open-dialog"));
            let dialog = env.insert(None, ElementSpec::new("div").id("settings").tabindex(-1));
            let dialog_buttons = vec![
                env.insert(Some(dialog), ElementSpec::new("button").id("save")),
                env.insert(Some(dialog), ElementSpec::new("button").id("cancel")),
            ];
            let ctx = UiContext::new(Rc::new(env.clone()));
            Self {
                env,
                ctx,
                trigger,
                dialog_buttons,
                opened: Rc::new(Cell::new(0)),
                closed: Rc::new(Cell::new(0)),
            }
        }

        fn modal(&self, config: ModalConfig) -> ModalController {
            let opened = Rc::clone(&self.opened);
            let closed = Rc::clone(&self.closed);
            let callbacks = ModalCallbacks {
                on_open: Some(Rc::new(move || opened.set(opened.get() + 1))),
                on_close: Some(Rc::new(move || closed.set(closed.get() + 1))),
                on_key_down: None,
            };
            let config = ModalConfig {
                id: Some("settings".to_string()),
                ..config
            };
            ModalController::new(&self.ctx, config, callbacks)
        }
    }

    #[test]
    fn open_locks_scroll_and_traps_focus_on_next_tick() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        fx.env.focus(fx.trigger);

        modal.open();
        assert!(modal.is_open());
        assert!(fx.env.is_scroll_locked());
        assert!(!modal.is_trapping_focus());
        assert_eq!(fx.env.active_element(), Some(fx.trigger));

        assert_eq!(fx.env.run_pending_tasks(), 1);
        assert!(modal.is_trapping_focus());
        assert_eq!(fx.env.active_element(), Some(fx.dialog_buttons[0]));

        let report = fx.env.dispatch_key(&KeyInput::shifted(Key::Tab));
        assert_eq!(report.active_after, Some(fx.dialog_buttons[1]));
    }

    #[test]
    fn double_open_fires_on_open_once() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        modal.open();
        modal.open();
        assert_eq!(fx.opened.get(), 1);
        assert_eq!(fx.env.pending_task_count(), 1);
    }

    #[test]
    fn close_restores_focus_and_scroll() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        fx.env.focus(fx.trigger);
        modal.open();
        fx.env.run_pending_tasks();

        modal.close();
        assert!(!modal.is_open());
        assert!(!fx.env.is_scroll_locked());
        assert!(!modal.is_trapping_focus());
        assert_eq!(fx.env.listener_count(), 0);
        assert_eq!(fx.env.active_element(), Some(fx.trigger));
        assert_eq!(fx.closed.get(), 1);

        modal.close();
        assert_eq!(fx.closed.get(), 1);
    }

    #[test]
    fn unclosable_modal_stays_open() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig {
            closable: false,
            ..ModalConfig::default()
        });
        modal.open();
        modal.close();
        modal.on_key_down(&KeyInput::plain(Key::Escape));
        modal.on_overlay_click(true);
        assert!(modal.is_open());
        assert_eq!(fx.closed.get(), 0);

        modal.set_closable(true);
        modal.toggle();
        assert!(!modal.is_open());
        assert_eq!(fx.closed.get(), 1);
    }

    #[test]
    fn closing_before_the_tick_cancels_trap_activation() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        modal.open();
        modal.close();
        assert_eq!(fx.env.pending_task_count(), 0);
        assert_eq!(fx.env.run_pending_tasks(), 0);
        assert!(!modal.is_trapping_focus());
        assert_eq!(fx.env.listener_count(), 0);
    }

    #[test]
    fn escape_and_overlay_clicks_close() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        modal.open();
        assert!(modal.on_key_down(&KeyInput::plain(Key::Escape)).prevent_default);
        assert!(!modal.is_open());

        modal.open();
        modal.on_overlay_click(false);
        assert!(modal.is_open());
        modal.on_overlay_click(true);
        assert!(!modal.is_open());
        assert_eq!(fx.closed.get(), 2);
    }

    #[test]
    fn escape_respects_configuration() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig {
            close_on_escape: false,
            close_on_backdrop: false,
            ..ModalConfig::default()
        });
        modal.open();
        assert!(modal.on_key_down(&KeyInput::plain(Key::Escape)).is_pass());
        modal.on_overlay_click(true);
        assert!(modal.is_open());
    }

    #[test]
    fn side_effects_follow_flags() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig {
            prevent_scroll: false,
            auto_focus: false,
            restore_focus: false,
            ..ModalConfig::default()
        });
        fx.env.focus(fx.trigger);
        modal.open();
        assert!(!fx.env.is_scroll_locked());
        assert_eq!(fx.env.pending_task_count(), 0);

        fx.env.focus(fx.dialog_buttons[1]);
        modal.close();
        assert_eq!(fx.env.active_element(), Some(fx.dialog_buttons[1]));
    }

    #[test]
    fn initially_open_applies_side_effects_without_callback() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig {
            open: true,
            ..ModalConfig::default()
        });
        assert!(modal.is_open());
        assert!(fx.env.is_scroll_locked());
        assert_eq!(fx.opened.get(), 0);
        assert_eq!(modal.props().data_state, "open");
    }

    #[test]
    fn dropping_an_open_modal_unlocks_scroll() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig::default());
        modal.open();
        drop(modal);
        assert!(!fx.env.is_scroll_locked());
        assert_eq!(fx.env.pending_task_count(), 0);
    }

    #[test]
    fn props_describe_a_dialog() {
        let fx = Fixture::new();
        let modal = fx.modal(ModalConfig {
            aria_label: Some("Settings".to_string()),
            ..ModalConfig::default()
        });
        let attrs = modal.props().to_attributes();
        assert_eq!(attrs.get("role"), Some("dialog"));
        assert_eq!(attrs.get("aria-modal"), Some("true"));
        assert_eq!(attrs.get("aria-label"), Some("Settings"));
        assert_eq!(attrs.get("tabindex"), Some("-1"));
        assert_eq!(attrs.get("data-state"), Some("closed"));
        assert_eq!(modal.overlay_props().data_state, "closed");
    }

    #[test]
    fn config_defaults_flags_on() {
        let config: ModalConfig =
            crate::config::from_json_str(r#"{"closable": "sometimes", "preventScroll": false}"#);
        assert!(config.closable);
        assert!(!config.prevent_scroll);
        assert!(config.auto_focus);
    }

    #[test]
    fn key_hook_runs_whether_or_not_escape_closes() {
        let fx = Fixture::new();
        let keys: Rc<RefCell<Vec<Key>>> = Rc::default();
        let seen = Rc::clone(&keys);
        let modal = ModalController::new(
            &fx.ctx,
            ModalConfig {
                close_on_escape: false,
                ..ModalConfig::default()
            },
            ModalCallbacks {
                on_key_down: Some(Rc::new(move |input: &KeyInput| {
                    seen.borrow_mut().push(input.key.clone())
                })),
                ..ModalCallbacks::default()
            },
        );

        assert_eq!(modal.on_key_down(&KeyInput::plain(Key::Escape)), EventControl::PASS);
        modal.open();
        assert_eq!(modal.on_key_down(&KeyInput::plain(Key::Escape)), EventControl::PASS);
        assert!(modal.is_open());
        assert_eq!(modal.on_key_down(&KeyInput::plain(Key::Enter)), EventControl::PASS);
        modal.close();
        modal.on_key_down(&KeyInput::plain(Key::Escape));

        assert_eq!(*keys.borrow(), vec![Key::Escape, Key::Escape, Key::Enter, Key::Escape]);
    }

    #[test]
    fn escape_that_closes_still_reaches_the_key_hook() {
        let fx = Fixture::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let modal = ModalController::new(
            &fx.ctx,
            ModalConfig {
                open: true,
                ..ModalConfig::default()
            },
            ModalCallbacks {
                on_key_down: Some(Rc::new(move |_: &KeyInput| counter.set(counter.get() + 1))),
                ..ModalCallbacks::default()
            },
        );
        assert_eq!(modal.on_key_down(&KeyInput::plain(Key::Escape)), EventControl::PREVENT);
        assert!(!modal.is_open());
        assert_eq!(hits.get(), 1);
    }
}
