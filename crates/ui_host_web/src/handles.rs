//! Handle table mapping opaque element handles to host nodes.

use ui_host::ElementHandle;

/// Table size at which [`HandleTable::prune_if_grown`] first prunes.
pub const PRUNE_THRESHOLD: usize = 256;

/// Interning table from host nodes to stable [`ElementHandle`]s.
///
/// Nodes are compared with a caller-supplied identity function because host
/// node types (JS objects) have no Rust-side identity. Handles are never
/// reused, so a handle whose node was pruned simply stops resolving.
#[derive(Debug)]
pub struct HandleTable<T> {
    entries: Vec<(ElementHandle, T)>,
    next: u64,
    prune_above: usize,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
            prune_above: PRUNE_THRESHOLD,
        }
    }
}

impl<T> HandleTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `node`, allocating one on first sight.
    pub fn intern(&mut self, node: T, same: impl Fn(&T, &T) -> bool) -> ElementHandle {
        if let Some(handle) = self.handle_of(&node, &same) {
            return handle;
        }
        self.next += 1;
        let handle = ElementHandle::from_raw(self.next);
        self.entries.push((handle, node));
        handle
    }

    /// Returns the handle already allocated for `node`.
    pub fn handle_of(&self, node: &T, same: impl Fn(&T, &T) -> bool) -> Option<ElementHandle> {
        self.entries
            .iter()
            .find(|(_, known)| same(known, node))
            .map(|(handle, _)| *handle)
    }

    /// Resolves a handle.
    pub fn get(&self, handle: ElementHandle) -> Option<&T> {
        self.entries
            .iter()
            .find(|(known, _)| *known == handle)
            .map(|(_, node)| node)
    }

    /// Drops entries whose node fails `keep`; returns how many were dropped.
    pub fn retain(&mut self, keep: impl Fn(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, node)| keep(node));
        before - self.entries.len()
    }

    /// Prunes with `keep` once the table outgrows its high-water mark.
    ///
    /// After a prune the mark becomes twice the surviving size (never below
    /// [`PRUNE_THRESHOLD`]), so a table full of live nodes is rescanned only
    /// after it doubles. Returns the number dropped when a prune ran.
    pub fn prune_if_grown(&mut self, keep: impl Fn(&T) -> bool) -> Option<usize> {
        if self.entries.len() <= self.prune_above {
            return None;
        }
        let pruned = self.retain(keep);
        self.prune_above = (self.entries.len() * 2).max(PRUNE_THRESHOLD);
        Some(pruned)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn interning_is_stable_per_identity() {
        let mut table = HandleTable::new();
        let a = Rc::new("dialog");
        let b = Rc::new("dialog");
        let first = table.intern(Rc::clone(&a), Rc::ptr_eq);
        let again = table.intern(Rc::clone(&a), Rc::ptr_eq);
        let other = table.intern(Rc::clone(&b), Rc::ptr_eq);
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(table.get(other).map(|node| **node), Some("dialog"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn live_tables_are_rescanned_only_after_doubling() {
        let mut table = HandleTable::new();
        for node in 0..=PRUNE_THRESHOLD {
            table.intern(node, |a, b| a == b);
        }
        let scans = Cell::new(0);
        let keep_all = |_: &usize| {
            scans.set(scans.get() + 1);
            true
        };

        assert_eq!(table.prune_if_grown(keep_all), Some(0));
        assert_eq!(scans.get(), PRUNE_THRESHOLD + 1);

        table.intern(PRUNE_THRESHOLD + 1, |a, b| a == b);
        assert_eq!(table.prune_if_grown(keep_all), None);
        assert_eq!(scans.get(), PRUNE_THRESHOLD + 1);

        for node in PRUNE_THRESHOLD + 2..=(PRUNE_THRESHOLD + 1) * 2 {
            table.intern(node, |a, b| a == b);
        }
        assert_eq!(table.prune_if_grown(|node| *node % 2 == 0), Some(PRUNE_THRESHOLD + 1));
        assert_eq!(table.len(), PRUNE_THRESHOLD + 2);
    }

    #[test]
    fn small_tables_never_prune() {
        let mut table = HandleTable::new();
        table.intern(1, |a, b| a == b);
        assert_eq!(table.prune_if_grown(|_| false), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn pruned_handles_stop_resolving_and_are_not_reused() {
        let mut table = HandleTable::new();
        let gone = table.intern(1, |a, b| a == b);
        let kept = table.intern(2, |a, b| a == b);
        assert_eq!(table.retain(|node| *node != 1), 1);
        assert_eq!(table.get(gone), None);
        assert_eq!(table.get(kept), Some(&2));

        let fresh = table.intern(1, |a, b| a == b);
        assert_ne!(fresh, gone);
    }
}
