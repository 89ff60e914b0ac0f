//! Keyboard event types routed to the selector by its host.

/// Keyboard keys (simplified set; the selector only intercepts a few).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Alt or Ctrl held on a closed trigger suppresses auto-open.
    pub fn suppresses_auto_open(&self) -> bool {
        self.alt || self.ctrl
    }
}
