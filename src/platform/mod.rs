//! Platform abstraction layer
//!
//! Maps browser keyboard events onto game input. Discrete presses become
//! `InputEvent`s; Space is the held movement key and is tracked separately.

use crate::screen::{InputEvent, is_printable};

/// Key name for the held movement key (`KeyboardEvent.key`)
pub const MOVE_KEY: &str = " ";

/// Map a `KeyboardEvent.key` value to a discrete input event
pub fn map_key(key: &str) -> Option<InputEvent> {
    match key {
        "Enter" => Some(InputEvent::Confirm),
        "Escape" => Some(InputEvent::Cancel),
        "Tab" => Some(InputEvent::ToggleField),
        "Backspace" => Some(InputEvent::Backspace),
        _ => {
            // Named keys ("Shift", "ArrowLeft") are longer than one char
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if is_printable(c) => Some(InputEvent::Char(c)),
                _ => None,
            }
        }
    }
}

/// Whether a key is the movement key
pub fn is_move_key(key: &str) -> bool {
    key == MOVE_KEY
}

/// Held-key tracker fed by keydown/keyup
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    moving: bool,
}

impl HeldKeys {
    pub fn key_down(&mut self, key: &str) {
        if is_move_key(key) {
            self.moving = true;
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if is_move_key(key) {
            self.moving = false;
        }
    }

    /// Drop held state (window blur)
    pub fn release_all(&mut self) {
        self.moving = false;
    }

    pub fn moving(&self) -> bool {
        self.moving
    }
}
