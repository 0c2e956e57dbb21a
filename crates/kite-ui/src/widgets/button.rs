use std::any::Any;
use std::path::Path;

use kite_render::{Color, Font, Image, Surface};

use crate::error::UiResult;
use crate::event::{Event, EventType};
use crate::widget::{EventHandler, Widget, WidgetBase};

const DEFAULT_BACKGROUND: u32 = 0x9a9a9a;
const PRESSED_DARKEN: f32 = 0.75;

/// How a button looks.
#[derive(Debug, Clone)]
pub enum ButtonFace {
    /// A label centred on a filled, bordered background.
    Text {
        label: String,
        font: Font,
        background: Color,
    },
    /// One image per state; the button takes the released image's size.
    Image { pressed: Image, released: Image },
}

/// A clickable button.
///
/// Pressing inside the bounds shows the pressed face and fires the
/// `ButtonDown` handler. Releasing restores the released face and fires the
/// `ButtonUp` handler when the release lands inside the bounds.
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    face: ButtonFace,
    pressed: bool,
}

impl Button {
    pub fn text(
        id: impl Into<String>,
        label: impl Into<String>,
        width: f32,
        height: f32,
        font: Font,
    ) -> Self {
        Self {
            base: WidgetBase::new(id, width, height),
            face: ButtonFace::Text {
                label: label.into(),
                font,
                background: Color::from_hex(DEFAULT_BACKGROUND),
            },
            pressed: false,
        }
    }

    pub fn image(id: impl Into<String>, pressed: Image, released: Image) -> Self {
        let (width, height) = (released.width() as f32, released.height() as f32);
        Self {
            base: WidgetBase::new(id, width, height),
            face: ButtonFace::Image { pressed, released },
            pressed: false,
        }
    }

    /// Load both faces from image files.
    pub fn load_images(
        id: impl Into<String>,
        pressed: impl AsRef<Path>,
        released: impl AsRef<Path>,
    ) -> UiResult<Self> {
        Ok(Self::image(id, Image::load(pressed)?, Image::load(released)?))
    }

    /// Offset inside a fixed-layout panel.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.base.set_position(x, y);
        self
    }

    /// Has no effect on image buttons.
    pub fn with_background(mut self, color: Color) -> Self {
        if let ButtonFace::Text { background, .. } = &mut self.face {
            *background = color;
        }
        self.base.mark_dirty();
        self
    }

    pub fn on_event(mut self, event_type: EventType, handler: EventHandler) -> Self {
        self.base.register_event_handler(event_type, handler);
        self
    }

    /// Handler for a press inside the button.
    pub fn on_click(self, handler: impl FnMut(&Event) -> UiResult<()> + 'static) -> Self {
        self.on_event(EventType::ButtonDown, Box::new(handler))
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn label(&self) -> Option<&str> {
        match &self.face {
            ButtonFace::Text { label, .. } => Some(label),
            ButtonFace::Image { .. } => None,
        }
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        if let ButtonFace::Text { label, .. } = &mut self.face {
            *label = text.into();
            self.base.mark_dirty();
        }
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.base.mark_dirty();
        }
    }
}

impl Widget for Button {
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
                if !self.base.contains(mouse.x, mouse.y) {
                    return Ok(());
                }
                self.set_pressed(true);
                self.base.invoke_handler(event)
            }
            Event::ButtonUp(mouse) => {
                self.set_pressed(false);
                if self.base.contains(mouse.x, mouse.y) {
                    self.base.invoke_handler(event)
                } else {
                    Ok(())
                }
            }
            Event::Keyboard(_)
            | Event::SetText(_)
            | Event::ValueChanged(_)
            | Event::Custom(_) => Ok(()),
        }
    }

    fn paint(&self) -> UiResult<Image> {
        match &self.face {
            ButtonFace::Text {
                label,
                font,
                background,
            } => {
                let (width, height) = self.base.pixel_size();
                let fill = if self.pressed {
                    background.darken(PRESSED_DARKEN)
                } else {
                    *background
                };

                let mut image = Image::filled(width, height, fill);
                image.draw_rect(0, 0, width, height, Color::BLACK);

                let text_x = (width as f32 - font.text_width(label)) / 2.0;
                let text_y = (height as f32 - font.line_height()) / 2.0;
                image.draw_text(label, font, text_x.round() as i32, text_y.round() as i32);
                Ok(image)
            }
            ButtonFace::Image { pressed, released } => {
                let face = if self.pressed { pressed } else { released };
                Ok(face.clone())
            }
        }
    }
}
