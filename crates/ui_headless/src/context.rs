//! Shared capabilities handed to every controller.

use std::rc::Rc;

use ui_host::{NoopUiEnvironment, UiEnvironment};

use crate::IdRegistry;

/// Environment plus id registry injected into controllers.
///
/// Clones share both the environment and the id counter.
#[derive(Clone)]
pub struct UiContext {
    env: Rc<dyn UiEnvironment>,
    ids: Rc<IdRegistry>,
}

impl UiContext {
    /// Creates a context over `env` with a fresh id registry.
    pub fn new(env: Rc<dyn UiEnvironment>) -> Self {
        Self::with_ids(env, Rc::new(IdRegistry::new()))
    }

    /// Creates a context over `env` that issues ids from `ids`.
    pub fn with_ids(env: Rc<dyn UiEnvironment>, ids: Rc<IdRegistry>) -> Self {
        Self { env, ids }
    }

    /// Context for server rendering: no document, fresh ids.
    pub fn headless() -> Self {
        Self::new(Rc::new(NoopUiEnvironment))
    }

    /// Environment capability.
    pub fn env(&self) -> &Rc<dyn UiEnvironment> {
        &self.env
    }

    /// Id registry.
    pub fn ids(&self) -> &IdRegistry {
        &self.ids
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("ids_issued", &self.ids.issued())
            .finish_non_exhaustive()
    }
}
