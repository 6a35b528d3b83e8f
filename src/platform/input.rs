//! Key vocabulary and per-tick input snapshots

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Start from the menu
    Space,
    /// Pause toggle
    Escape,
    /// Purge the NPC under adjudication
    P,
    /// Spare the NPC under adjudication
    S,
    /// Death and Decay
    Digit1,
    /// Death Coil
    Digit2,
    /// Burst of Light
    Digit3,
}

impl Key {
    pub fn is_directional(&self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "space" => Some(Key::Space),
            "escape" | "esc" => Some(Key::Escape),
            "p" => Some(Key::P),
            "s" => Some(Key::S),
            "1" => Some(Key::Digit1),
            "2" => Some(Key::Digit2),
            "3" => Some(Key::Digit3),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Keys held down this tick
    pub pressed: Vec<Key>,
    /// Keys that went down this tick (edge-triggered actions)
    pub just_pressed: Vec<Key>,
}

impl TickInput {
    /// Keys freshly pressed this tick; they count as held as well
    pub fn tap(keys: &[Key]) -> Self {
        Self {
            pressed: keys.to_vec(),
            just_pressed: keys.to_vec(),
        }
    }

    /// Keys held from an earlier tick
    pub fn hold(keys: &[Key]) -> Self {
        Self {
            pressed: keys.to_vec(),
            just_pressed: Vec::new(),
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.just_pressed.is_empty()
    }
}

/// Produces one input snapshot per tick
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}
