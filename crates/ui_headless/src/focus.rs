//! Focus trapping for modal surfaces.

use std::{cell::Cell, rc::Rc};

use ui_host::{ElementHandle, Key, KeyDispatch, KeyInput, KeyListener, ListenerId, UiEnvironment};

/// Decides where a Tab press should wrap to inside a trapped focusable set.
///
/// Returns the first element for Tab on the last element, the last element
/// for Shift+Tab on the first element, and `None` when the press should pass
/// through to native tabbing.
pub fn tab_wrap_target(
    focusables: &[ElementHandle],
    active: Option<ElementHandle>,
    shift: bool,
) -> Option<ElementHandle> {
    let (first, last) = (*focusables.first()?, *focusables.last()?);
    let active = active?;
    if shift && active == first {
        Some(last)
    } else if !shift && active == last {
        Some(first)
    } else {
        None
    }
}

/// Active focus trap over one container.
///
/// The focusable set is captured when the trap is enabled. Dropping the trap
/// disables it.
pub struct FocusTrap {
    env: Rc<dyn UiEnvironment>,
    container: ElementHandle,
    focusables: Rc<[ElementHandle]>,
    listener: Cell<Option<ListenerId>>,
}

impl FocusTrap {
    /// Captures the focusable set of `container`, focuses its first element,
    /// and installs the Tab-wrapping key listener.
    ///
    /// An empty set installs nothing and focuses nothing.
    pub fn enable(env: Rc<dyn UiEnvironment>, container: ElementHandle) -> Self {
        let focusables: Rc<[ElementHandle]> = env.focusable_descendants(container).into();

        let listener = if focusables.is_empty() {
            None
        } else {
            let set = Rc::clone(&focusables);
            let on_key: KeyListener = Rc::new(move |input: &KeyInput, active: Option<ElementHandle>| {
                if input.key != Key::Tab {
                    return KeyDispatch::pass();
                }
                tab_wrap_target(&set, active, input.shift)
                    .map(KeyDispatch::redirect)
                    .unwrap_or_default()
            });
            Some(env.add_key_listener(container, on_key))
        };

        if let Some(first) = focusables.first() {
            env.focus(*first);
        }
        tracing::debug!(%container, focusables = focusables.len(), "focus trap enabled");

        Self {
            env,
            container,
            focusables,
            listener: Cell::new(listener),
        }
    }

    /// Removes the key listener. Calling this more than once is harmless.
    pub fn disable(&self) {
        if let Some(listener) = self.listener.take() {
            self.env.remove_key_listener(listener);
            tracing::debug!(container = %self.container, "focus trap disabled");
        }
    }

    /// Returns whether the key listener is still installed.
    pub fn is_active(&self) -> bool {
        self.listener.get().is_some()
    }

    /// Trapped container.
    pub fn container(&self) -> ElementHandle {
        self.container
    }

    /// Focusable set captured at activation.
    pub fn focusables(&self) -> &[ElementHandle] {
        &self.focusables
    }
}

impl Drop for FocusTrap {
    fn drop(&mut self) {
        self.disable();
    }
}

impl std::fmt::Debug for FocusTrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTrap")
            .field("container", &self.container)
            .field("focusables", &self.focusables)
            .field("active", &self.is_active())
            .finish()
    }
}
