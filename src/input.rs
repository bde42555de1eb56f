//! Keyboard pressed-state record
//!
//! Event handlers write here between frames; the tick reads one snapshot per
//! frame through [`KeyState::take_input`].

use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Right,
    Left,
    Jump,
}

impl GameKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "d" | "D" => Some(GameKey::Right),
            "a" | "A" => Some(GameKey::Left),
            "w" | "W" => Some(GameKey::Jump),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pub right: bool,
    pub left: bool,
    /// Jump impulse waiting for the next tick
    jump_queued: bool,
}

impl KeyState {
    /// Returns true if the key is one the game handles
    pub fn key_down(&mut self, key: &str) -> bool {
        match GameKey::from_key(key) {
            Some(GameKey::Right) => self.right = true,
            Some(GameKey::Left) => self.left = true,
            Some(GameKey::Jump) => self.jump_queued = true,
            None => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match GameKey::from_key(key) {
            Some(GameKey::Right) => self.right = false,
            Some(GameKey::Left) => self.left = false,
            Some(GameKey::Jump) => {}
            None => return false,
        }
        true
    }

    /// Snapshot for one tick; the jump impulse is consumed
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            right: self.right,
            left: self.left,
            jump: std::mem::take(&mut self.jump_queued),
        }
    }
}
