//! Component id generation.

use std::cell::Cell;

use ui_host::next_unique_stamp;

/// Issues component ids of the form `{scope-}{prefix}-{n}`.
///
/// A registry is an explicit value owned by a [`crate::UiContext`]; two
/// registries never share a counter, so tests and independent render roots
/// start from a known state.
#[derive(Debug, Default)]
pub struct IdRegistry {
    counter: Cell<u64>,
    scope: Option<String>,
}

impl IdRegistry {
    /// Creates a registry whose first id ends in `-1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose ids carry `scope` as a leading segment.
    ///
    /// Use one scope per render root when several roots share a document.
    pub fn scoped(scope: impl Into<String>) -> Self {
        let scope = scope.into();
        Self {
            counter: Cell::new(0),
            scope: (!scope.trim().is_empty()).then_some(scope),
        }
    }

    /// Returns the next id for `prefix` (an empty prefix becomes `id`).
    pub fn next_id(&self, prefix: &str) -> String {
        let next = self.counter.get().saturating_add(1);
        self.counter.set(next);
        let prefix = if prefix.is_empty() { "id" } else { prefix };
        match &self.scope {
            Some(scope) => format!("{scope}-{prefix}-{next}"),
            None => format!("{prefix}-{next}"),
        }
    }

    /// Returns `explicit` when present and non-blank, otherwise a fresh id.
    pub fn resolve(&self, explicit: Option<&str>, prefix: &str) -> String {
        match explicit.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.next_id(prefix),
        }
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.counter.get()
    }
}

/// Returns a time-derived token unique within the current thread.
///
/// Used where ids must not collide across registries, such as toast keys.
pub fn unique_token() -> String {
    format!("uid-{}", to_base36(next_unique_stamp()))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn ids_are_sequential_per_registry() {
        let ids = IdRegistry::new();
        assert_eq!(ids.next_id("button"), "button-1");
        assert_eq!(ids.next_id("modal"), "modal-2");
        assert_eq!(ids.next_id(""), "id-3");

        let fresh = IdRegistry::new();
        assert_eq!(fresh.next_id("button"), "button-1");
    }

    #[test]
    fn scoped_ids_carry_scope() {
        let ids = IdRegistry::scoped("sidebar");
        assert_eq!(ids.next_id("tab"), "sidebar-tab-1");
        assert_eq!(IdRegistry::scoped("  ").next_id("tab"), "tab-1");
    }

    #[test]
    fn explicit_ids_win_without_consuming_counter() {
        let ids = IdRegistry::new();
        assert_eq!(ids.resolve(Some("save"), "button"), "save");
        assert_eq!(ids.resolve(Some("  "), "button"), "button-1");
        assert_eq!(ids.issued(), 1);
    }

    #[test]
    fn unique_tokens_differ() {
        assert_ne!(unique_token(), unique_token());
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    proptest! {
        #[test]
        fn generated_ids_never_repeat(prefixes in proptest::collection::vec("[a-z]{0,6}", 1..64)) {
            let ids = IdRegistry::new();
            let mut seen = HashSet::new();
            for prefix in &prefixes {
                prop_assert!(seen.insert(ids.next_id(prefix)));
            }
        }
    }
}
