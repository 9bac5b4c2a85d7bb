//! Host-neutral keyboard model shared by environments and controllers.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ElementHandle;

/// Logical key parsed from a DOM `KeyboardEvent.key` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `PageUp`.
    PageUp,
    /// `PageDown`.
    PageDown,
    /// `Enter`.
    Enter,
    /// The space bar (`" "`, or legacy `Spacebar`).
    Space,
    /// `Tab`.
    Tab,
    /// `Escape` (or legacy `Esc`).
    Escape,
    /// A single printable character.
    Character(char),
    /// Any other named key, kept verbatim.
    Other(String),
}

impl Key {
    /// Parses a DOM `key` value.
    pub fn from_dom(raw: &str) -> Self {
        match raw {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::Character(ch),
                    _ => Self::Other(other.to_string()),
                }
            }
        }
    }

    /// Returns the DOM `key` value for this key.
    pub fn as_dom(&self) -> String {
        match self {
            Self::ArrowUp => "ArrowUp".to_string(),
            Self::ArrowDown => "ArrowDown".to_string(),
            Self::ArrowLeft => "ArrowLeft".to_string(),
            Self::ArrowRight => "ArrowRight".to_string(),
            Self::Home => "Home".to_string(),
            Self::End => "End".to_string(),
            Self::PageUp => "PageUp".to_string(),
            Self::PageDown => "PageDown".to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Space => " ".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Escape => "Escape".to_string(),
            Self::Character(ch) => ch.to_string(),
            Self::Other(name) => name.clone(),
        }
    }

    /// Returns whether the key activates a control (Enter or Space).
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// One keydown/keyup occurrence with modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Logical key.
    pub key: Key,
    /// Shift modifier.
    pub shift: bool,
    /// Control modifier.
    pub ctrl: bool,
    /// Alt/Option modifier.
    pub alt: bool,
    /// Meta/Command modifier.
    pub meta: bool,
}

impl KeyInput {
    /// Key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    /// Key press with Shift held.
    pub fn shifted(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    /// Builds a key input from raw DOM event fields.
    pub fn from_dom(key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self {
            key: Key::from_dom(key),
            shift,
            ctrl,
            alt,
            meta,
        }
    }
}

/// Default-action and propagation instructions returned by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventControl {
    /// Whether the host should call `preventDefault`.
    pub prevent_default: bool,
    /// Whether the host should call `stopPropagation`.
    pub stop_propagation: bool,
}

impl EventControl {
    /// Let the event continue untouched.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Suppress the host default action only.
    pub const PREVENT: Self = Self {
        prevent_default: true,
        stop_propagation: false,
    };

    /// Returns whether the event was left untouched.
    pub const fn is_pass(self) -> bool {
        !self.prevent_default && !self.stop_propagation
    }
}

/// Response from a [`KeyListener`]: event control plus an optional focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyDispatch {
    /// Default-action instructions for the host.
    pub control: EventControl,
    /// Element the host should focus after applying `control`.
    pub focus: Option<ElementHandle>,
}

impl KeyDispatch {
    /// Leaves the event and focus untouched.
    pub const fn pass() -> Self {
        Self {
            control: EventControl::PASS,
            focus: None,
        }
    }

    /// Prevents the default action and moves focus to `target`.
    pub const fn redirect(target: ElementHandle) -> Self {
        Self {
            control: EventControl::PREVENT,
            focus: Some(target),
        }
    }
}

/// Keydown listener installed on a container element.
///
/// The second argument is the element that had focus when the key was pressed.
pub type KeyListener = Rc<dyn Fn(&KeyInput, Option<ElementHandle>) -> KeyDispatch>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_named_and_legacy_keys() {
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Character('a'));
        assert_eq!(Key::from_dom("F5"), Key::Other("F5".to_string()));
    }

    #[test]
    fn dom_names_round_trip_for_named_keys() {
        for key in [Key::Home, Key::End, Key::Tab, Key::Space, Key::PageDown] {
            assert_eq!(Key::from_dom(&key.as_dom()), key);
        }
    }

    #[test]
    fn activation_keys_are_enter_and_space() {
        assert!(Key::Enter.is_activation());
        assert!(Key::Space.is_activation());
        assert!(!Key::Tab.is_activation());
    }
}
