//! DOM event translation shared by the components.

use leptos::ev::KeyboardEvent;
use ui_host::{EventControl, KeyInput};

pub(crate) fn key_input(ev: &KeyboardEvent) -> KeyInput {
    KeyInput::from_dom(
        &ev.key(),
        ev.shift_key(),
        ev.ctrl_key(),
        ev.alt_key(),
        ev.meta_key(),
    )
}

pub(crate) fn apply_control(ev: &web_sys::Event, control: EventControl) {
    if control.prevent_default {
        ev.prevent_default();
    }
    if control.stop_propagation {
        ev.stop_propagation();
    }
}

/// Whether the event was dispatched on the element whose handler is running,
/// rather than bubbling up from a descendant.
pub(crate) fn targets_self(ev: &web_sys::Event) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => js_sys::Object::is(target.as_ref(), current.as_ref()),
        _ => false,
    }
}
