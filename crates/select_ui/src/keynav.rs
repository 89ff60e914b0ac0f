//! Keyboard-navigation state machine over the search input and menu items.

use crate::event::Key;

/// Where keyboard focus sits inside the open dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search input (the original's index −1)
    #[default]
    Input,
    /// Menu item `i`, `0 <= i < N` for N visible items
    Item(usize),
}

/// What a consumed key asks the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Focus moved; the host re-reads [`Focus`] and moves real input focus
    /// so assistive technology and highlighting track it.
    FocusChanged,
    /// Commit the first visible item and close.
    SelectFirst,
    /// Close without changing the selection.
    Close,
    /// Consumed, nothing to do (e.g. Down on an empty list).
    Consumed,
    /// Not one of the intercepted keys; the host lets it propagate.
    Ignored,
}

impl NavAction {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, NavAction::Ignored)
    }
}

/// Finite state machine over focus position.
#[derive(Debug, Default)]
pub struct KeyboardNavigator {
    focus: Focus,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Back to the input, e.g. when the dropdown opens.
    pub fn reset(&mut self) {
        self.focus = Focus::Input;
    }

    /// Clamp a stale item index after the visible count changed.
    pub fn sync_len(&mut self, visible: usize) {
        if let Focus::Item(i) = self.focus {
            if i >= visible {
                self.focus = match visible {
                    0 => Focus::Input,
                    n => Focus::Item(n - 1),
                };
            }
        }
    }

    /// Keys arriving while the search input is focused. Only Enter, Escape,
    /// Down and Tab are intercepted.
    pub fn on_input_key(&mut self, key: Key, visible: usize) -> NavAction {
        match key {
            Key::Down => {
                if visible > 0 {
                    self.focus = Focus::Item(0);
                    log::trace!("keynav: input -> item 0");
                    NavAction::FocusChanged
                } else {
                    NavAction::Consumed
                }
            }
            Key::Enter => {
                if visible > 0 {
                    NavAction::SelectFirst
                } else {
                    NavAction::Consumed
                }
            }
            Key::Escape | Key::Tab => NavAction::Close,
            _ => NavAction::Ignored,
        }
    }

    /// Keys arriving while a menu item is focused. Only Up and Down are
    /// intercepted; there is no wraparound at either end.
    pub fn on_item_key(&mut self, key: Key, visible: usize) -> NavAction {
        self.sync_len(visible);
        let Focus::Item(i) = self.focus else {
            // Focus fell back to the input (list emptied); treat like an
            // input key so Down can re-enter the list.
            return match key {
                Key::Up | Key::Down => self.on_input_key(key, visible),
                _ => NavAction::Ignored,
            };
        };

        match key {
            Key::Up => {
                self.focus = match i {
                    0 => Focus::Input,
                    _ => Focus::Item(i - 1),
                };
                log::trace!("keynav: up -> {:?}", self.focus);
                NavAction::FocusChanged
            }
            Key::Down => {
                if i + 1 < visible {
                    self.focus = Focus::Item(i + 1);
                    log::trace!("keynav: down -> {:?}", self.focus);
                    NavAction::FocusChanged
                } else {
                    NavAction::Consumed
                }
            }
            _ => NavAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_from_input_focuses_first() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.on_input_key(Key::Down, 3), NavAction::FocusChanged);
        assert_eq!(nav.focus(), Focus::Item(0));
    }

    #[test]
    fn test_down_from_input_with_empty_list() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.on_input_key(Key::Down, 0), NavAction::Consumed);
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_enter_selects_first_when_nonempty() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.on_input_key(Key::Enter, 2), NavAction::SelectFirst);
        assert_eq!(nav.on_input_key(Key::Enter, 0), NavAction::Consumed);
    }

    #[test]
    fn test_escape_and_tab_close() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.on_input_key(Key::Escape, 2), NavAction::Close);
        assert_eq!(nav.on_input_key(Key::Tab, 2), NavAction::Close);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut nav = KeyboardNavigator::new();
        assert_eq!(nav.on_input_key(Key::Char('a'), 2), NavAction::Ignored);
        assert_eq!(nav.on_input_key(Key::Left, 2), NavAction::Ignored);
        nav.on_input_key(Key::Down, 2);
        assert_eq!(nav.on_item_key(Key::Char('a'), 2), NavAction::Ignored);
        assert_eq!(nav.on_item_key(Key::Enter, 2), NavAction::Ignored);
    }

    #[test]
    fn test_down_stops_at_last_item() {
        let mut nav = KeyboardNavigator::new();
        nav.on_input_key(Key::Down, 2);
        assert_eq!(nav.on_item_key(Key::Down, 2), NavAction::FocusChanged);
        assert_eq!(nav.focus(), Focus::Item(1));
        // No wraparound.
        assert_eq!(nav.on_item_key(Key::Down, 2), NavAction::Consumed);
        assert_eq!(nav.focus(), Focus::Item(1));
    }

    #[test]
    fn test_up_from_first_returns_to_input() {
        let mut nav = KeyboardNavigator::new();
        nav.on_input_key(Key::Down, 2);
        assert_eq!(nav.on_item_key(Key::Up, 2), NavAction::FocusChanged);
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_stale_index_is_clamped() {
        let mut nav = KeyboardNavigator::new();
        nav.on_input_key(Key::Down, 5);
        nav.on_item_key(Key::Down, 5);
        nav.on_item_key(Key::Down, 5);
        assert_eq!(nav.focus(), Focus::Item(2));

        // List shrank under the focused index.
        nav.sync_len(2);
        assert_eq!(nav.focus(), Focus::Item(1));

        nav.sync_len(0);
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_focus_never_exceeds_bounds() {
        let mut nav = KeyboardNavigator::new();
        nav.on_input_key(Key::Down, 1);
        for _ in 0..10 {
            nav.on_item_key(Key::Down, 1);
            match nav.focus() {
                Focus::Item(i) => assert!(i < 1),
                Focus::Input => {}
            }
        }
    }
}
