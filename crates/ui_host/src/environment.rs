//! Environment capability contract and the no-op adapter.

use crate::{ElementHandle, KeyListener, ListenerId, TaskId};

/// Deferred unit of work queued with [`UiEnvironment::schedule_next_tick`].
pub type TickTask = Box<dyn FnOnce()>;

/// Host capability consumed by headless controllers instead of global DOM access.
///
/// Every operation is best-effort: a host that cannot honor a request reports
/// `false`/`None` or silently ignores it. Nothing here is modeled as failing.
pub trait UiEnvironment {
    /// Returns the element that currently has keyboard focus.
    fn active_element(&self) -> Option<ElementHandle>;

    /// Looks up an element by its document id.
    fn element_by_id(&self, id: &str) -> Option<ElementHandle>;

    /// Returns the focusable descendants of `container` in document order.
    ///
    /// The set is computed fresh on every call.
    fn focusable_descendants(&self, container: ElementHandle) -> Vec<ElementHandle>;

    /// Moves focus to `element`; returns whether the element accepted focus.
    fn focus(&self, element: ElementHandle) -> bool;

    /// Removes focus from `element` when it is focused.
    fn blur(&self, element: ElementHandle);

    /// Suppresses (`true`) or restores (`false`) page scrolling.
    fn set_scroll_locked(&self, locked: bool);

    /// Returns whether page scrolling is currently suppressed.
    fn is_scroll_locked(&self) -> bool;

    /// Installs a keydown listener on `container`.
    fn add_key_listener(&self, container: ElementHandle, listener: KeyListener) -> ListenerId;

    /// Removes a listener. Unknown or already removed ids are ignored.
    fn remove_key_listener(&self, listener: ListenerId);

    /// Runs `task` after the current event turn (the next paint tick in browsers).
    fn schedule_next_tick(&self, task: TickTask) -> TaskId;

    /// Cancels a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel_task(&self, task: TaskId);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op environment for server rendering and unsupported targets.
///
/// It has no elements, never takes focus, and drops scheduled tasks.
pub struct NoopUiEnvironment;

impl UiEnvironment for NoopUiEnvironment {
    fn active_element(&self) -> Option<ElementHandle> {
        None
    }

    fn element_by_id(&self, _id: &str) -> Option<ElementHandle> {
        None
    }

    fn focusable_descendants(&self, _container: ElementHandle) -> Vec<ElementHandle> {
        Vec::new()
    }

    fn focus(&self, _element: ElementHandle) -> bool {
        false
    }

    fn blur(&self, _element: ElementHandle) {}

    fn set_scroll_locked(&self, _locked: bool) {}

    fn is_scroll_locked(&self) -> bool {
        false
    }

    fn add_key_listener(&self, _container: ElementHandle, _listener: KeyListener) -> ListenerId {
        ListenerId::from_raw(0)
    }

    fn remove_key_listener(&self, _listener: ListenerId) {}

    fn schedule_next_tick(&self, _task: TickTask) -> TaskId {
        TaskId::from_raw(0)
    }

    fn cancel_task(&self, _task: TaskId) {}
}
