use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Keys the viewer reacts to. Windowing backends map their own codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

impl Key {
    /// Parse a key name as written in configuration files and on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Self::W,
            "a" => Self::A,
            "s" => Self::S,
            "d" => Self::D,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "escape" | "esc" => Self::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// A raw input event, already detached from the windowing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    /// Absolute cursor position in window pixels.
    CursorMoved { x: f32, y: f32 },
    /// Vertical scroll in lines; positive away from the user.
    Scroll { y: f32 },
    /// Mouse-look switched on or off.
    MouseLook(bool),
    FocusLost,
    CloseRequested,
}

/// FIFO of events waiting for the next frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

/// Key-state query, the polling half of the input contract.
pub trait KeySource {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: BTreeSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

impl KeySource for KeyboardState {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
