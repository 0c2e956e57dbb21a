//! Events delivered to widgets and listeners.
//!
//! Events are plain values: built once, passed by reference during dispatch
//! and cloned only when handed to another thread.

use std::borrow::Cow;

use kite_core::math::Vec2;
use kite_input::Key;

use crate::widget::WidgetData;

/// Discriminant used to key handlers and listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ButtonDown,
    ButtonUp,
    Keyboard,
    SetText,
    ValueChanged,
    Custom,
}

/// Which mouse transition a mouse event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub description: String,
    pub x: f32,
    pub y: f32,
}

impl MouseEvent {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Either a printable character or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Key(Key),
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        KeyInput::Char(c)
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::Key(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: KeyInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetTextEvent {
    pub text: String,
    /// Widget the text is meant for; `None` addresses every text widget.
    pub target: Option<String>,
}

impl SetTextEvent {
    pub fn applies_to(&self, widget_id: &str) -> bool {
        self.target.as_deref().is_none_or(|target| target == widget_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueChangedEvent {
    pub widget: String,
    pub value: WidgetData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ButtonDown(MouseEvent),
    ButtonUp(MouseEvent),
    Keyboard(KeyboardEvent),
    SetText(SetTextEvent),
    /// Emitted by the window after a delivered event changed a widget's data.
    ValueChanged(ValueChangedEvent),
    Custom(CustomEvent),
}

impl Event {
    pub fn mouse(description: impl Into<String>, x: f32, y: f32, action: MouseAction) -> Self {
        let mouse = MouseEvent {
            description: description.into(),
            x,
            y,
        };
        match action {
            MouseAction::Down => Event::ButtonDown(mouse),
            MouseAction::Up => Event::ButtonUp(mouse),
        }
    }

    pub fn button_down(x: f32, y: f32) -> Self {
        Self::mouse("button down", x, y, MouseAction::Down)
    }

    pub fn button_up(x: f32, y: f32) -> Self {
        Self::mouse("button up", x, y, MouseAction::Up)
    }

    pub fn keyboard(key: impl Into<KeyInput>) -> Self {
        Event::Keyboard(KeyboardEvent { key: key.into() })
    }

    /// Set-text addressed to every text widget that receives it.
    pub fn set_text(text: impl Into<String>) -> Self {
        Event::SetText(SetTextEvent {
            text: text.into(),
            target: None,
        })
    }

    /// Set-text addressed to one widget.
    pub fn set_text_for(target: impl Into<String>, text: impl Into<String>) -> Self {
        Event::SetText(SetTextEvent {
            text: text.into(),
            target: Some(target.into()),
        })
    }

    pub fn value_changed(widget: impl Into<String>, value: WidgetData) -> Self {
        Event::ValueChanged(ValueChangedEvent {
            widget: widget.into(),
            value,
        })
    }

    pub fn custom(name: impl Into<String>, description: impl Into<String>) -> Self {
        Event::Custom(CustomEvent {
            name: name.into(),
            description: description.into(),
        })
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Event::ButtonDown(_) => EventType::ButtonDown,
            Event::ButtonUp(_) => EventType::ButtonUp,
            Event::Keyboard(_) => EventType::Keyboard,
            Event::SetText(_) => EventType::SetText,
            Event::ValueChanged(_) => EventType::ValueChanged,
            Event::Custom(_) => EventType::Custom,
        }
    }

    /// Human-readable summary, used in logs.
    pub fn description(&self) -> Cow<'_, str> {
        match self {
            Event::ButtonDown(m) | Event::ButtonUp(m) => Cow::Borrowed(&m.description),
            Event::Keyboard(k) => match k.key {
                KeyInput::Char(c) => Cow::Owned(format!("character '{}'", c)),
                KeyInput::Key(key) => Cow::Owned(format!("key {:?}", key)),
            },
            Event::SetText(s) => Cow::Owned(format!("set text '{}'", s.text)),
            Event::ValueChanged(v) => Cow::Owned(format!("'{}' changed to {:?}", v.widget, v.value)),
            Event::Custom(c) => Cow::Borrowed(&c.description),
        }
    }

    /// Cursor position for mouse events.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Event::ButtonDown(m) | Event::ButtonUp(m) => Some(m.position()),
            _ => None,
        }
    }
}
