//! Opaque element handles issued by a [`crate::UiEnvironment`].

use serde::{Deserialize, Serialize};

/// Stable, environment-issued reference to one element in the host document.
///
/// Handles are cheap copies. They never own the element; an environment may
/// report a stale handle as unknown once the element leaves the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(u64);

impl ElementHandle {
    /// Wraps a raw environment-specific handle value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Identifier of a key listener installed through [`crate::UiEnvironment::add_key_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw listener id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw listener id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identifier of a task queued through [`crate::UiEnvironment::schedule_next_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw task id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw task id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}
