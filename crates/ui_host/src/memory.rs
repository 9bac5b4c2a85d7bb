//! In-memory document used for tests and non-browser hosts.
//!
//! The simulated document keeps an element tree with attributes, a focused
//! element, scroll lock state, keydown listeners, and a next-tick task queue.
//! Key dispatch bubbles from the focused element to its ancestors and then
//! performs native Tab movement unless a listener prevented it.

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};

use crate::{
    ElementHandle, EventControl, Key, KeyInput, KeyListener, ListenerId, TaskId, TickTask,
    UiEnvironment,
};

const NATIVE_CONTROL_TAGS: [&str; 4] = ["button", "input", "select", "textarea"];

/// Declarative description of an element to insert into a [`MemoryUiEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl ElementSpec {
    /// Starts a spec for an element with `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the element `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Sets an arbitrary attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Marks the element `disabled`.
    pub fn disabled(self) -> Self {
        self.attr("disabled", "")
    }

    /// Sets the `tabindex` attribute.
    pub fn tabindex(self, value: i32) -> Self {
        self.attr("tabindex", value.to_string())
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<ElementHandle>,
    children: Vec<ElementHandle>,
    attached: bool,
}

impl MemoryNode {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Mirrors the interactive-element selector used for focus traps.
    fn is_tabbable(&self) -> bool {
        if self.tag == "a" && self.attributes.contains_key("href") {
            return true;
        }
        if NATIVE_CONTROL_TAGS.contains(&self.tag.as_str())
            && !self.attributes.contains_key("disabled")
        {
            return true;
        }
        if let Some(tabindex) = self.attr("tabindex") {
            if tabindex.trim() != "-1" {
                return true;
            }
        }
        self.attr("contenteditable") == Some("true")
    }

    fn accepts_programmatic_focus(&self) -> bool {
        self.is_tabbable() || self.attributes.contains_key("tabindex")
    }
}

#[derive(Default)]
struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    roots: Vec<ElementHandle>,
    active: Option<ElementHandle>,
    scroll_locked: bool,
    listeners: Vec<(ListenerId, ElementHandle, KeyListener)>,
    tasks: VecDeque<(TaskId, TickTask)>,
    next_listener: u64,
    next_task: u64,
}

impl MemoryDocument {
    fn node(&self, handle: ElementHandle) -> Option<&MemoryNode> {
        let index = usize::try_from(handle.raw()).ok()?.checked_sub(1)?;
        self.nodes.get(index).filter(|node| node.attached)
    }

    fn node_mut(&mut self, handle: ElementHandle) -> Option<&mut MemoryNode> {
        let index = usize::try_from(handle.raw()).ok()?.checked_sub(1)?;
        self.nodes.get_mut(index).filter(|node| node.attached)
    }

    fn collect_preorder(&self, from: ElementHandle, out: &mut Vec<ElementHandle>) {
        let Some(node) = self.node(from) else {
            return;
        };
        out.push(from);
        for child in &node.children {
            self.collect_preorder(*child, out);
        }
    }

    fn document_order(&self) -> Vec<ElementHandle> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_preorder(*root, &mut out);
        }
        out
    }

    fn ancestors_inclusive(&self, handle: ElementHandle) -> Vec<ElementHandle> {
        let mut chain = Vec::new();
        let mut cursor = Some(handle);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                break;
            };
            chain.push(current);
            cursor = node.parent;
        }
        chain
    }

    fn tabbable_in_document(&self) -> Vec<ElementHandle> {
        self.document_order()
            .into_iter()
            .filter(|handle| self.node(*handle).is_some_and(MemoryNode::is_tabbable))
            .collect()
    }
}

/// Outcome of [`MemoryUiEnvironment::dispatch_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEventReport {
    /// Combined control requested by the listeners that ran.
    pub control: EventControl,
    /// Focused element once listeners and native behavior finished.
    pub active_after: Option<ElementHandle>,
}

#[derive(Clone, Default)]
/// Simulated document implementing [`UiEnvironment`].
///
/// Clones share the same document.
pub struct MemoryUiEnvironment {
    inner: Rc<RefCell<MemoryDocument>>,
}

impl std::fmt::Debug for MemoryUiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.inner.borrow();
        f.debug_struct("MemoryUiEnvironment")
            .field("elements", &doc.nodes.len())
            .field("active", &doc.active)
            .field("scroll_locked", &doc.scroll_locked)
            .field("listeners", &doc.listeners.len())
            .field("pending_tasks", &doc.tasks.len())
            .finish()
    }
}

impl MemoryUiEnvironment {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element as the last child of `parent`, or as a new root.
    pub fn insert(&self, parent: Option<ElementHandle>, spec: ElementSpec) -> ElementHandle {
        let mut doc = self.inner.borrow_mut();
        let handle = ElementHandle::from_raw(doc.nodes.len() as u64 + 1);
        let parent = parent.filter(|parent| doc.node(*parent).is_some());
        doc.nodes.push(MemoryNode {
            tag: spec.tag,
            attributes: spec.attributes,
            parent,
            children: Vec::new(),
            attached: true,
        });
        match parent {
            Some(parent) => {
                if let Some(node) = doc.node_mut(parent) {
                    node.children.push(handle);
                }
            }
            None => doc.roots.push(handle),
        }
        handle
    }

    /// Detaches `element` and its subtree. Focus inside the subtree is dropped.
    pub fn remove(&self, element: ElementHandle) {
        let mut doc = self.inner.borrow_mut();
        let mut subtree = Vec::new();
        doc.collect_preorder(element, &mut subtree);
        if subtree.is_empty() {
            return;
        }
        let parent = doc.node(element).and_then(|node| node.parent);
        match parent {
            Some(parent) => {
                if let Some(node) = doc.node_mut(parent) {
                    node.children.retain(|child| *child != element);
                }
            }
            None => doc.roots.retain(|root| *root != element),
        }
        if doc.active.is_some_and(|active| subtree.contains(&active)) {
            doc.active = None;
        }
        for handle in subtree {
            if let Some(node) = doc.node_mut(handle) {
                node.attached = false;
            }
        }
    }

    /// Sets an attribute on an attached element.
    pub fn set_attribute(&self, element: ElementHandle, name: &str, value: &str) {
        if let Some(node) = self.inner.borrow_mut().node_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Removes an attribute from an attached element.
    pub fn remove_attribute(&self, element: ElementHandle, name: &str) {
        if let Some(node) = self.inner.borrow_mut().node_mut(element) {
            node.attributes.remove(name);
        }
    }

    /// Returns an attribute value of an attached element.
    pub fn attribute(&self, element: ElementHandle, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .node(element)
            .and_then(|node| node.attr(name).map(str::to_string))
    }

    /// Returns the tag name of an attached element.
    pub fn tag(&self, element: ElementHandle) -> Option<String> {
        self.inner.borrow().node(element).map(|node| node.tag.clone())
    }

    /// Number of installed key listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    pub fn pending_task_count(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Runs the tasks queued before this call and returns how many ran.
    ///
    /// Tasks scheduled while draining wait for the next call.
    pub fn run_pending_tasks(&self) -> usize {
        let batch = self.inner.borrow().tasks.len();
        let mut ran = 0;
        for _ in 0..batch {
            let next = self.inner.borrow_mut().tasks.pop_front();
            let Some((_, task)) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    /// Dispatches a keydown at the focused element.
    ///
    /// Listeners on the focused element and its ancestors run innermost first.
    /// An unprevented Tab then moves focus to the next (or previous, with Shift)
    /// tabbable element in document order, leaving the document at either end.
    pub fn dispatch_key(&self, input: &KeyInput) -> KeyEventReport {
        let active = self.active_element();
        let listeners: Vec<KeyListener> = {
            let doc = self.inner.borrow();
            match active {
                Some(active) => doc
                    .ancestors_inclusive(active)
                    .into_iter()
                    .flat_map(|container| {
                        doc.listeners
                            .iter()
                            .filter(move |(_, target, _)| *target == container)
                            .map(|(_, _, listener)| Rc::clone(listener))
                    })
                    .collect(),
                None => Vec::new(),
            }
        };

        let mut control = EventControl::PASS;
        for listener in listeners {
            let dispatch = listener(input, self.active_element());
            if let Some(target) = dispatch.focus {
                self.focus(target);
            }
            control.prevent_default |= dispatch.control.prevent_default;
            if dispatch.control.stop_propagation {
                control.stop_propagation = true;
                break;
            }
        }

        if input.key == Key::Tab && !control.prevent_default {
            self.native_tab(input.shift);
        }

        KeyEventReport {
            control,
            active_after: self.active_element(),
        }
    }

    fn native_tab(&self, backwards: bool) {
        let mut doc = self.inner.borrow_mut();
        let order = doc.tabbable_in_document();
        let position = doc
            .active
            .and_then(|active| order.iter().position(|handle| *handle == active));
        doc.active = match (position, backwards) {
            (None, false) => order.first().copied(),
            (None, true) => order.last().copied(),
            (Some(index), false) => order.get(index + 1).copied(),
            (Some(index), true) => index.checked_sub(1).and_then(|i| order.get(i).copied()),
        };
    }
}

impl UiEnvironment for MemoryUiEnvironment {
    fn active_element(&self) -> Option<ElementHandle> {
        let doc = self.inner.borrow();
        doc.active.filter(|active| doc.node(*active).is_some())
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        let doc = self.inner.borrow();
        doc.document_order()
            .into_iter()
            .find(|handle| doc.node(*handle).and_then(|node| node.attr("id")) == Some(id))
    }

    fn focusable_descendants(&self, container: ElementHandle) -> Vec<ElementHandle> {
        let doc = self.inner.borrow();
        let mut subtree = Vec::new();
        doc.collect_preorder(container, &mut subtree);
        subtree
            .into_iter()
            .skip(1)
            .filter(|handle| doc.node(*handle).is_some_and(MemoryNode::is_tabbable))
            .collect()
    }

    fn focus(&self, element: ElementHandle) -> bool {
        let mut doc = self.inner.borrow_mut();
        let focusable = doc
            .node(element)
            .is_some_and(MemoryNode::accepts_programmatic_focus);
        if focusable {
            doc.active = Some(element);
        }
        focusable
    }

    fn blur(&self, element: ElementHandle) {
        let mut doc = self.inner.borrow_mut();
        if doc.active == Some(element) {
            doc.active = None;
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.inner.borrow_mut().scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.inner.borrow().scroll_locked
    }

    fn add_key_listener(&self, container: ElementHandle, listener: KeyListener) -> ListenerId {
        let mut doc = self.inner.borrow_mut();
        doc.next_listener += 1;
        let id = ListenerId::from_raw(doc.next_listener);
        doc.listeners.push((id, container, listener));
        id
    }

    fn remove_key_listener(&self, listener: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _, _)| *id != listener);
    }

    fn schedule_next_tick(&self, task: TickTask) -> TaskId {
        let mut doc = self.inner.borrow_mut();
        doc.next_task += 1;
        let id = TaskId::from_raw(doc.next_task);
        doc.tasks.push_back((id, task));
        id
    }

    fn cancel_task(&self, task: TaskId) {
        self.inner.borrow_mut().tasks.retain(|(id, _)| *id != task);
    }
}
