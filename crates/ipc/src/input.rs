//! Keyboard input and the shortcuts the core understands.

use serde::{Deserialize, Serialize};

/// Keyboard input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// Keyboard modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// History shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortcut {
    Undo,
    Redo,
}

impl Shortcut {
    /// Map a key press to a shortcut.
    ///
    /// Primary+Z is undo; Primary+Shift+Z and Primary+Y are redo. Key
    /// matching ignores case since Shift reports an uppercase key.
    pub fn from_key(event: &KeyboardEvent) -> Option<Self> {
        if !event.pressed || !event.modifiers.primary() {
            return None;
        }

        if event.key.eq_ignore_ascii_case("z") {
            if event.modifiers.shift {
                Some(Shortcut::Redo)
            } else {
                Some(Shortcut::Undo)
            }
        } else if event.key.eq_ignore_ascii_case("y") {
            Some(Shortcut::Redo)
        } else {
            None
        }
    }
}
