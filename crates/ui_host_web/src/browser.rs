//! `web-sys` backed environment.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::{Rc, Weak},
};

use ui_host::{
    ElementHandle, KeyInput, KeyListener, ListenerId, TaskId, TickTask, UiEnvironment,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::{HandleTable, FOCUSABLE_SELECTOR};

type KeyClosure = Closure<dyn FnMut(KeyboardEvent)>;

fn same_element(a: &Element, b: &Element) -> bool {
    js_sys::Object::is(a.as_ref(), b.as_ref())
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

#[derive(Default)]
struct WebState {
    handles: RefCell<HandleTable<Element>>,
    listeners: RefCell<HashMap<ListenerId, (Element, KeyClosure)>>,
    tasks: RefCell<HashMap<TaskId, (i32, TickTask)>>,
    next_listener: Cell<u64>,
    next_task: Cell<u64>,
}

impl WebState {
    fn handle_for(&self, element: Element) -> ElementHandle {
        let mut handles = self.handles.borrow_mut();
        if let Some(pruned) = handles.prune_if_grown(|node| node.is_connected()) {
            tracing::debug!(pruned, live = handles.len(), "pruned detached element handles");
        }
        handles.intern(element, same_element)
    }

    fn element(&self, handle: ElementHandle) -> Option<Element> {
        self.handles.borrow().get(handle).cloned()
    }

    fn active_handle(&self) -> Option<ElementHandle> {
        let document = document()?;
        let active = document.active_element()?;
        if let Some(body) = document.body() {
            if js_sys::Object::is(active.as_ref(), body.as_ref()) {
                return None;
            }
        }
        Some(self.handle_for(active))
    }

    fn focus_handle(&self, handle: ElementHandle) -> bool {
        self.element(handle)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .is_some_and(|element| element.focus().is_ok())
    }

    fn run_task(&self, task: TaskId) {
        let entry = self.tasks.borrow_mut().remove(&task);
        if let Some((_, run)) = entry {
            run();
        }
    }
}

#[derive(Clone, Default)]
/// Browser environment over the current `window.document`.
///
/// Clones share the handle table, listeners and scheduled tasks.
pub struct WebUiEnvironment {
    state: Rc<WebState>,
}

impl WebUiEnvironment {
    /// Creates an environment bound to the current document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for a DOM element, e.g. one obtained from a node ref.
    pub fn handle_for(&self, element: Element) -> ElementHandle {
        self.state.handle_for(element)
    }

    /// Resolves a handle back to its DOM element.
    pub fn element(&self, handle: ElementHandle) -> Option<Element> {
        self.state.element(handle)
    }
}

impl std::fmt::Debug for WebUiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebUiEnvironment")
            .field("handles", &self.state.handles.borrow().len())
            .field("listeners", &self.state.listeners.borrow().len())
            .field("pending_tasks", &self.state.tasks.borrow().len())
            .finish()
    }
}

impl UiEnvironment for WebUiEnvironment {
    fn active_element(&self) -> Option<ElementHandle> {
        self.state.active_handle()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        let element = document()?.get_element_by_id(id)?;
        Some(self.state.handle_for(element))
    }

    fn focusable_descendants(&self, container: ElementHandle) -> Vec<ElementHandle> {
        let Some(container) = self.state.element(container) else {
            return Vec::new();
        };
        let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
            tracing::warn!("focusable selector query failed");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.state.handle_for(element))
            .collect()
    }

    fn focus(&self, element: ElementHandle) -> bool {
        self.state.focus_handle(element)
    }

    fn blur(&self, element: ElementHandle) {
        if let Some(element) = self
            .state
            .element(element)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            let _ = element.blur();
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = document().and_then(|document| document.body()) else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(err) = result {
            tracing::warn!(?err, locked, "updating body overflow failed");
        }
    }

    fn is_scroll_locked(&self) -> bool {
        document()
            .and_then(|document| document.body())
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .is_some_and(|overflow| overflow == "hidden")
    }

    fn add_key_listener(&self, container: ElementHandle, listener: KeyListener) -> ListenerId {
        let next = self.state.next_listener.get() + 1;
        self.state.next_listener.set(next);
        let id = ListenerId::from_raw(next);

        let Some(element) = self.state.element(container) else {
            tracing::warn!(%container, "key listener target is not a known element");
            return id;
        };

        let weak: Weak<WebState> = Rc::downgrade(&self.state);
        let closure: KeyClosure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let input = KeyInput::from_dom(
                &event.key(),
                event.shift_key(),
                event.ctrl_key(),
                event.alt_key(),
                event.meta_key(),
            );
            let dispatch = listener(&input, state.active_handle());
            if dispatch.control.prevent_default {
                event.prevent_default();
            }
            if dispatch.control.stop_propagation {
                event.stop_propagation();
            }
            if let Some(target) = dispatch.focus {
                state.focus_handle(target);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        if let Err(err) =
            element.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "installing keydown listener failed");
            return id;
        }
        self.state.listeners.borrow_mut().insert(id, (element, closure));
        id
    }

    fn remove_key_listener(&self, listener: ListenerId) {
        let entry = self.state.listeners.borrow_mut().remove(&listener);
        if let Some((element, closure)) = entry {
            let _ = element
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    }

    fn schedule_next_tick(&self, task: TickTask) -> TaskId {
        let next = self.state.next_task.get() + 1;
        self.state.next_task.set(next);
        let id = TaskId::from_raw(next);

        let Some(window) = web_sys::window() else {
            return id;
        };
        let weak: Weak<WebState> = Rc::downgrade(&self.state);
        let callback = Closure::once_into_js(move || {
            if let Some(state) = weak.upgrade() {
                state.run_task(id);
            }
        });
        match window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            Ok(timeout) => {
                self.state.tasks.borrow_mut().insert(id, (timeout, task));
            }
            Err(err) => tracing::warn!(?err, "scheduling next-tick task failed"),
        }
        id
    }

    fn cancel_task(&self, task: TaskId) {
        let entry = self.state.tasks.borrow_mut().remove(&task);
        if let Some((timeout, _)) = entry {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout);
            }
        }
    }
}
