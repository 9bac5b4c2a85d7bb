//! Native stand-in with the browser environment's public surface.

use ui_host::{
    ElementHandle, KeyListener, ListenerId, NoopUiEnvironment, TaskId, TickTask, UiEnvironment,
};

#[derive(Debug, Clone, Default)]
/// Browser environment placeholder for non-`wasm32` builds.
///
/// Behaves like [`NoopUiEnvironment`]: there is no document to query.
pub struct WebUiEnvironment {
    inert: NoopUiEnvironment,
}

impl WebUiEnvironment {
    /// Creates the inert environment.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UiEnvironment for WebUiEnvironment {
    fn active_element(&self) -> Option<ElementHandle> {
        self.inert.active_element()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.inert.element_by_id(id)
    }

    fn focusable_descendants(&self, container: ElementHandle) -> Vec<ElementHandle> {
        self.inert.focusable_descendants(container)
    }

    fn focus(&self, element: ElementHandle) -> bool {
        self.inert.focus(element)
    }

    fn blur(&self, element: ElementHandle) {
        self.inert.blur(element);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.inert.set_scroll_locked(locked);
    }

    fn is_scroll_locked(&self) -> bool {
        self.inert.is_scroll_locked()
    }

    fn add_key_listener(&self, container: ElementHandle, listener: KeyListener) -> ListenerId {
        tracing::debug!(%container, "key listener ignored outside the browser");
        self.inert.add_key_listener(container, listener)
    }

    fn remove_key_listener(&self, listener: ListenerId) {
        self.inert.remove_key_listener(listener);
    }

    fn schedule_next_tick(&self, task: TickTask) -> TaskId {
        self.inert.schedule_next_tick(task)
    }

    fn cancel_task(&self, task: TaskId) {
        self.inert.cancel_task(task);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ui_host::{KeyDispatch, KeyInput};

    use super::*;

    #[test]
    fn native_build_is_inert() {
        let env = WebUiEnvironment::new();
        assert_eq!(env.element_by_id("app"), None);
        env.set_scroll_locked(true);
        assert!(!env.is_scroll_locked());
        let handle = ElementHandle::from_raw(1);
        let listener = env.add_key_listener(
            handle,
            Rc::new(|_: &KeyInput, _: Option<ElementHandle>| KeyDispatch::pass()),
        );
        env.remove_key_listener(listener);
        assert!(env.focusable_descendants(handle).is_empty());
    }
}
