//! Kite Input
//!
//! The host hands the UI one [`InputState`] per frame: cursor position, held
//! mouse buttons, characters typed since the last frame, and how many
//! consecutive frames each key has been held. [`InputSystem`] builds those
//! snapshots from raw host events.

pub mod repeat;

use kite_core::alloc::{HashMap, HashSet};
use kite_core::math::Vec2;

pub use repeat::KeyRepeat;

/// Non-character keys the toolkit reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

bitflags::bitflags! {
    /// Set of mouse buttons held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 0b001;
        const RIGHT = 0b010;
        const MIDDLE = 0b100;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// A raw event reported by the host between two frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// Cursor moved, in window pixel coordinates.
    CursorMoved { x: f32, y: f32 },
    ButtonPressed(MouseButton),
    ButtonReleased(MouseButton),
    KeyPressed(Key),
    KeyReleased(Key),
    /// A printable character was typed.
    CharTyped(char),
}

/// Input snapshot for a single frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    cursor: Vec2,
    buttons: MouseButtons,
    typed: Vec<char>,
    key_durations: HashMap<Key, u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(mut self, x: f32, y: f32) -> Self {
        self.cursor = Vec2::new(x, y);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons |= button.into();
        self
    }

    pub fn with_char(mut self, c: char) -> Self {
        self.typed.push(c);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.typed.extend(text.chars());
        self
    }

    /// Mark `key` as held for `frames` consecutive frames (including this one).
    pub fn with_key_held(mut self, key: Key, frames: u32) -> Self {
        if frames > 0 {
            self.key_durations.insert(key, frames);
        }
        self
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }

    /// Characters typed since the previous frame, in order.
    pub fn typed_chars(&self) -> &[char] {
        &self.typed
    }

    /// Number of consecutive frames `key` has been held, 0 when released.
    pub fn key_press_duration(&self, key: Key) -> u32 {
        self.key_durations.get(&key).copied().unwrap_or(0)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.key_press_duration(key) > 0
    }

    /// True only on the first frame of a key press.
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.key_press_duration(key) == 1
    }
}

/// Accumulates raw host events and turns them into per-frame snapshots.
#[derive(Debug, Default)]
pub struct InputSystem {
    cursor: Vec2,
    buttons: MouseButtons,
    typed: Vec<char>,
    held: HashSet<Key>,
    durations: HashMap<Key, u32>,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, event: &RawInput) {
        match *event {
            RawInput::CursorMoved { x, y } => self.cursor = Vec2::new(x, y),
            RawInput::ButtonPressed(button) => self.buttons |= button.into(),
            RawInput::ButtonReleased(button) => self.buttons -= button.into(),
            RawInput::KeyPressed(key) => {
                self.held.insert(key);
            }
            RawInput::KeyReleased(key) => {
                self.held.remove(&key);
            }
            RawInput::CharTyped(c) if !c.is_control() => self.typed.push(c),
            RawInput::CharTyped(c) => {
                tracing::trace!("ignoring control character {:?}", c);
            }
        }
    }

    pub fn on_events<'a>(&mut self, events: impl IntoIterator<Item = &'a RawInput>) {
        for event in events {
            self.on_event(event);
        }
    }

    /// Close the current frame and return its snapshot.
    ///
    /// Held keys advance their duration by one; released keys drop to zero and
    /// typed characters are consumed.
    pub fn frame(&mut self) -> InputState {
        self.durations.retain(|key, _| self.held.contains(key));
        for key in &self.held {
            *self.durations.entry(*key).or_insert(0) += 1;
        }

        InputState {
            cursor: self.cursor,
            buttons: self.buttons,
            typed: std::mem::take(&mut self.typed),
            key_durations: self.durations.clone(),
        }
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}
