use std::any::Any;

use kite_input::Key;
use kite_render::{Color, Font, Image, Surface};

use crate::error::UiResult;
use crate::event::{Event, EventType, KeyInput};
use crate::widget::{EventHandler, Widget, WidgetBase, WidgetData};

/// Draw calls between caret blinks.
pub const CARET_BLINK_INTERVAL: u32 = 30;

const TEXT_PADDING: i32 = 2;

/// A single-line text field.
///
/// A press inside the field focuses it; a press delivered outside it drops
/// focus. While focused, typed characters append to the text and Backspace
/// removes the last character.
#[derive(Debug)]
pub struct TextInput {
    base: WidgetBase,
    text: String,
    background: Color,
    font: Font,
    draws_since_blink: u32,
    caret_visible: bool,
}

impl TextInput {
    pub fn new(id: impl Into<String>, width: f32, height: f32, font: Font) -> Self {
        Self {
            base: WidgetBase::new(id, width, height),
            text: String::new(),
            background: Color::GREEN,
            font,
            draws_since_blink: 0,
            caret_visible: true,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.base.set_position(x, y);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self.base.mark_dirty();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn on_event(mut self, event_type: EventType, handler: EventHandler) -> Self {
        self.base.register_event_handler(event_type, handler);
        self
    }

    /// Handler for keystrokes accepted while focused.
    pub fn on_change(self, handler: impl FnMut(&Event) -> UiResult<()> + 'static) -> Self {
        self.on_event(EventType::Keyboard, Box::new(handler))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.base.mark_dirty();
    }

    pub fn is_caret_visible(&self) -> bool {
        self.base.has_focus() && self.caret_visible
    }

    fn focus(&mut self, focused: bool) {
        if self.base.set_focus(focused) {
            self.draws_since_blink = 0;
            self.caret_visible = true;
        }
    }

    /// Apply a key press. Returns whether the text changed.
    fn apply_key(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                self.text.push(c);
                true
            }
            KeyInput::Key(Key::Backspace) => self.text.pop().is_some(),
            KeyInput::Key(_) => false,
        }
    }
}

impl Widget for TextInput {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn handle_event(&mut self, event: &Event) -> UiResult<()> {
        match event {
            Event::ButtonDown(mouse) => {
                let inside = self.base.contains(mouse.x, mouse.y);
                self.focus(inside);
                if inside {
                    self.base.mark_dirty();
                    return self.base.invoke_handler(event);
                }
                Ok(())
            }
            Event::Keyboard(keyboard) => {
                if !self.base.has_focus() {
                    return Ok(());
                }
                if self.apply_key(keyboard.key) {
                    self.base.mark_dirty();
                    tracing::debug!("Text input '{}' now reads '{}'", self.base.id(), self.text);
                }
                self.base.invoke_handler(event)
            }
            Event::SetText(set_text) => {
                if !set_text.applies_to(self.base.id()) {
                    return Ok(());
                }
                self.set_text(set_text.text.as_str());
                self.base.invoke_handler(event)
            }
            Event::ButtonUp(_) | Event::ValueChanged(_) | Event::Custom(_) => Ok(()),
        }
    }

    fn before_draw(&mut self) {
        if !self.base.has_focus() {
            return;
        }
        self.draws_since_blink += 1;
        if self.draws_since_blink >= CARET_BLINK_INTERVAL {
            self.draws_since_blink = 0;
            self.caret_visible = !self.caret_visible;
            self.base.mark_dirty();
        }
    }

    fn paint(&self) -> UiResult<Image> {
        let (width, height) = self.base.pixel_size();
        let mut image = Image::filled(width, height, self.background);
        image.draw_rect(0, 0, width, height, Color::BLACK);

        let text_y = ((height as f32 - self.font.line_height()) / 2.0).round() as i32;
        image.draw_text(&self.text, &self.font, TEXT_PADDING, text_y);

        if self.is_caret_visible() {
            let caret_x = TEXT_PADDING + self.font.text_width(&self.text).round() as i32;
            image.draw_text("|", &self.font, caret_x, text_y);
        }
        Ok(image)
    }

    fn data(&self) -> UiResult<WidgetData> {
        Ok(WidgetData::Text(self.text.clone()))
    }
}
