//! Environment capability contract for headless UI controllers.
//!
//! Controllers never touch `document` or `window` directly. They receive an
//! `Rc<dyn UiEnvironment>` and address elements through opaque
//! [`ElementHandle`]s. Browser wiring lives in `ui_host_web`; this crate ships
//! the [`NoopUiEnvironment`] for server rendering and the
//! [`MemoryUiEnvironment`] simulated document for tests and other hosts.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod clock;
pub mod element;
pub mod environment;
pub mod keyboard;
pub mod memory;

pub use clock::{next_unique_stamp, unix_time_ms_now, STAMP_SEQUENCE_BITS};
pub use element::{ElementHandle, ListenerId, TaskId};
pub use environment::{NoopUiEnvironment, TickTask, UiEnvironment};
pub use keyboard::{EventControl, Key, KeyDispatch, KeyInput, KeyListener};
pub use memory::{ElementSpec, KeyEventReport, MemoryUiEnvironment};
