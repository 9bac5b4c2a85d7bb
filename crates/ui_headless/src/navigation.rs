//! Roving keyboard navigation over an ordered item list.

use serde::{Deserialize, Serialize};
use ui_host::{ElementHandle, EventControl, Key, KeyInput, UiEnvironment};

use crate::tokens::Orientation;

/// Navigation behavior for one list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationOptions {
    /// Wrap past either end instead of clamping.
    #[serde(rename = "loop", deserialize_with = "crate::config::lenient_true")]
    pub loop_focus: bool,
    /// Axis whose arrow keys move the index.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub orientation: Orientation,
    /// Also report arrow, Home and End moves through the select hook.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub select_on_move: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            loop_focus: true,
            orientation: Orientation::Horizontal,
            select_on_move: false,
        }
    }
}

impl NavigationOptions {
    /// Vertical list options.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            ..Self::default()
        }
    }

    /// Returns the same options with looping set to `loop_focus`.
    pub fn with_loop(self, loop_focus: bool) -> Self {
        Self { loop_focus, ..self }
    }

    /// Returns the same options with move-selects set to `select_on_move`.
    pub fn with_select_on_move(self, select_on_move: bool) -> Self {
        Self {
            select_on_move,
            ..self
        }
    }
}

/// What a key press asks the list to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Key not handled, or the index did not change.
    None,
    /// Move focus to the contained index.
    Move(usize),
    /// Select the contained (current) index without moving focus.
    Select(usize),
}

/// Result of resolving one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Index after the key press.
    pub index: usize,
    /// Requested side effect.
    pub action: NavigationAction,
    /// Default-action instructions for the host event.
    pub control: EventControl,
}

/// Resolves a key press against a list of `len` items; see [`resolve_navigation_filtered`].
pub fn resolve_navigation(
    input: &KeyInput,
    len: usize,
    current: usize,
    options: NavigationOptions,
) -> NavigationOutcome {
    resolve_navigation_filtered(input, len, current, options, |_| false)
}

/// Resolves a key press, skipping items for which `is_disabled` returns true.
///
/// Arrow keys move only along `options.orientation`; Home/End jump to the
/// first/last enabled item; Enter/Space select the current index. Handled keys
/// request `preventDefault`. An empty list never moves.
pub fn resolve_navigation_filtered(
    input: &KeyInput,
    len: usize,
    current: usize,
    options: NavigationOptions,
    is_disabled: impl Fn(usize) -> bool,
) -> NavigationOutcome {
    let unchanged = NavigationOutcome {
        index: current,
        action: NavigationAction::None,
        control: EventControl::PASS,
    };
    if len == 0 {
        return unchanged;
    }
    let current = current.min(len - 1);
    let horizontal = options.orientation == Orientation::Horizontal;

    let target = match input.key {
        Key::ArrowRight if horizontal => step(current, len, true, options.loop_focus, &is_disabled),
        Key::ArrowLeft if horizontal => step(current, len, false, options.loop_focus, &is_disabled),
        Key::ArrowDown if !horizontal => step(current, len, true, options.loop_focus, &is_disabled),
        Key::ArrowUp if !horizontal => step(current, len, false, options.loop_focus, &is_disabled),
        Key::Home => (0..len).find(|i| !is_disabled(*i)).unwrap_or(current),
        Key::End => (0..len).rev().find(|i| !is_disabled(*i)).unwrap_or(current),
        Key::Enter | Key::Space => {
            return NavigationOutcome {
                index: current,
                action: NavigationAction::Select(current),
                control: EventControl::PREVENT,
            };
        }
        _ => return NavigationOutcome { index: current, ..unchanged },
    };

    NavigationOutcome {
        index: target,
        action: if target == current {
            NavigationAction::None
        } else {
            NavigationAction::Move(target)
        },
        control: EventControl::PREVENT,
    }
}

fn step(
    current: usize,
    len: usize,
    forward: bool,
    looped: bool,
    is_disabled: &impl Fn(usize) -> bool,
) -> usize {
    let mut index = current;
    for _ in 0..len {
        let next = match (forward, looped) {
            (true, _) if index + 1 < len => index + 1,
            (true, true) => 0,
            (false, _) if index > 0 => index - 1,
            (false, true) => len - 1,
            _ => return current,
        };
        if !is_disabled(next) {
            return next;
        }
        index = next;
    }
    current
}

/// Optional observers for [`handle_keyboard_navigation`].
#[derive(Default, Clone, Copy)]
pub struct NavigationHooks<'a> {
    /// Called with the current index on Enter/Space, and with the new index
    /// after a move when [`NavigationOptions::select_on_move`] is set.
    pub on_select: Option<&'a dyn Fn(usize)>,
    /// Called with the new index after focus moved.
    pub on_change: Option<&'a dyn Fn(usize)>,
}

/// Resolves a key press over `items` and applies its side effects.
///
/// Moves focus to the new item when the index changes and invokes the hooks.
/// Returns the full outcome so callers can apply [`NavigationOutcome::control`]
/// to the originating event.
pub fn handle_keyboard_navigation(
    env: &dyn UiEnvironment,
    input: &KeyInput,
    items: &[ElementHandle],
    current: usize,
    options: NavigationOptions,
    hooks: NavigationHooks<'_>,
) -> NavigationOutcome {
    let outcome = resolve_navigation(input, items.len(), current, options);
    match outcome.action {
        NavigationAction::Move(index) => {
            if let Some(item) = items.get(index) {
                env.focus(*item);
            }
            if let Some(on_change) = hooks.on_change {
                on_change(index);
            }
            if options.select_on_move {
                if let Some(on_select) = hooks.on_select {
                    on_select(index);
                }
            }
        }
        NavigationAction::Select(index) => {
            if let Some(on_select) = hooks.on_select {
                on_select(index);
            }
        }
        NavigationAction::None => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use ui_host::{ElementSpec, MemoryUiEnvironment};

    use super::*;

    fn press(key: Key, len: usize, current: usize, options: NavigationOptions) -> usize {
        resolve_navigation(&KeyInput::plain(key), len, current, options).index
    }

    #[test]
    fn arrow_right_wraps_when_looping_and_clamps_otherwise() {
        let looping = NavigationOptions::default();
        assert_eq!(press(Key::ArrowRight, 3, 2, looping), 0);
        assert_eq!(press(Key::ArrowRight, 3, 2, looping.with_loop(false)), 2);
        assert_eq!(press(Key::ArrowLeft, 3, 0, looping), 2);
        assert_eq!(press(Key::ArrowLeft, 3, 0, looping.with_loop(false)), 0);
    }

    #[test]
    fn arrows_off_axis_are_ignored() {
        let outcome = resolve_navigation(
            &KeyInput::plain(Key::ArrowDown),
            3,
            1,
            NavigationOptions::default(),
        );
        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.action, NavigationAction::None);
        assert!(outcome.control.is_pass());

        assert_eq!(press(Key::ArrowDown, 3, 1, NavigationOptions::vertical()), 2);
        assert_eq!(press(Key::ArrowRight, 3, 1, NavigationOptions::vertical()), 1);
    }

    #[test]
    fn home_end_and_selection() {
        let options = NavigationOptions::default();
        assert_eq!(press(Key::Home, 5, 3, options), 0);
        assert_eq!(press(Key::End, 5, 1, options), 4);

        let outcome = resolve_navigation(&KeyInput::plain(Key::Space), 5, 3, options);
        assert_eq!(outcome.action, NavigationAction::Select(3));
        assert_eq!(outcome.index, 3);
        assert!(outcome.control.prevent_default);
    }

    #[test]
    fn empty_list_never_moves() {
        let outcome = resolve_navigation(
            &KeyInput::plain(Key::End),
            0,
            0,
            NavigationOptions::default(),
        );
        assert_eq!(outcome.index, 0);
        assert_eq!(outcome.action, NavigationAction::None);
    }

    #[test]
    fn disabled_items_are_skipped() {
        let input = KeyInput::plain(Key::ArrowRight);
        let options = NavigationOptions::default();
        let outcome = resolve_navigation_filtered(&input, 4, 0, options, |i| i == 1 || i == 2);
        assert_eq!(outcome.index, 3);
        let outcome = resolve_navigation_filtered(&input, 4, 3, options.with_loop(false), |i| i == 0);
        assert_eq!(outcome.index, 3);
        let home = resolve_navigation_filtered(&KeyInput::plain(Key::Home), 4, 3, options, |i| i == 0);
        assert_eq!(home.index, 1);
    }

    #[test]
    fn handler_focuses_new_item_and_reports_hooks() {
        let env = MemoryUiEnvironment::new();
        let list = env.insert(None, ElementSpec::new("ul"));
        let items: Vec<_> = (0..3)
            .map(|_| env.insert(Some(list), ElementSpec::new("li").tabindex(-1)))
            .collect();
        let changes = RefCell::new(Vec::new());
        let selections = RefCell::new(Vec::new());
        let on_change = |index: usize| changes.borrow_mut().push(index);
        let on_select = |index: usize| selections.borrow_mut().push(index);
        let hooks = NavigationHooks {
            on_select: Some(&on_select),
            on_change: Some(&on_change),
        };

        let outcome = handle_keyboard_navigation(
            &env,
            &KeyInput::plain(Key::ArrowRight),
            &items,
            2,
            NavigationOptions::default(),
            hooks,
        );
        assert_eq!(outcome.index, 0);
        assert_eq!(env.active_element(), Some(items[0]));

        handle_keyboard_navigation(
            &env,
            &KeyInput::plain(Key::Enter),
            &items,
            0,
            NavigationOptions::default(),
            hooks,
        );
        assert_eq!(env.active_element(), Some(items[0]));
        assert_eq!(*changes.borrow(), vec![0]);
        assert_eq!(*selections.borrow(), vec![0]);
    }

    #[test]
    fn moves_select_only_when_asked() {
        let env = MemoryUiEnvironment::new();
        let list = env.insert(None, ElementSpec::new("ul"));
        let items: Vec<_> = (0..3)
            .map(|_| env.insert(Some(list), ElementSpec::new("li").tabindex(-1)))
            .collect();
        let selections = RefCell::new(Vec::new());
        let on_select = |index: usize| selections.borrow_mut().push(index);
        let hooks = NavigationHooks {
            on_select: Some(&on_select),
            on_change: None,
        };

        let plain = NavigationOptions::default();
        handle_keyboard_navigation(&env, &KeyInput::plain(Key::End), &items, 0, plain, hooks);
        assert!(selections.borrow().is_empty());

        let selecting = plain.with_select_on_move(true);
        handle_keyboard_navigation(&env, &KeyInput::plain(Key::Home), &items, 2, selecting, hooks);
        handle_keyboard_navigation(&env, &KeyInput::plain(Key::ArrowRight), &items, 0, selecting, hooks);
        handle_keyboard_navigation(&env, &KeyInput::plain(Key::Enter), &items, 1, selecting, hooks);
        assert_eq!(*selections.borrow(), vec![0, 1, 1]);
        assert_eq!(env.active_element(), Some(items[1]));

        let decoded: NavigationOptions =
            serde_json::from_str(r#"{"selectOnMove": true}"#).expect("decode");
        assert_eq!(decoded, selecting);
    }

    #[test]
    fn options_decode_leniently() {
        let options: NavigationOptions =
            serde_json::from_str(r#"{"loop": "yes", "orientation": "vertical"}"#).expect("decode");
        assert_eq!(options, NavigationOptions::vertical());
        let options: NavigationOptions =
            serde_json::from_str(r#"{"loop": false, "orientation": "diagonal"}"#).expect("decode");
        assert_eq!(options, NavigationOptions::default().with_loop(false));
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(len in 1usize..32, current in 0usize..40, looped in any::<bool>(), key in 0usize..6) {
            let key = [Key::ArrowLeft, Key::ArrowRight, Key::Home, Key::End, Key::Enter, Key::Tab][key].clone();
            let options = NavigationOptions::default().with_loop(looped);
            let outcome = resolve_navigation(&KeyInput::plain(key), len, current, options);
            prop_assert!(outcome.index < len);
        }

        #[test]
        fn looping_right_is_modular(len in 1usize..32, current in 0usize..32) {
            prop_assume!(current < len);
            let index = press(Key::ArrowRight, len, current, NavigationOptions::default());
            prop_assert_eq!(index, (current + 1) % len);
        }
    }
}
