use std::any::Any;
use std::path::Path;

use kite_render::{Color, Image, Surface};

use crate::error::UiResult;
use crate::event::{Event, EventType};
use crate::widget::{EventHandler, Widget, WidgetBase, WidgetData};

const BOX_COLOR: u32 = 0xdddddd;
const CHECK_COLOR: u32 = 0x202020;

#[derive(Debug, Clone)]
pub enum CheckBoxFace {
    /// Box and check mark drawn at the widget's size.
    Drawn { box_color: Color, check_color: Color },
    /// One image per state; the checkbox takes the unchecked image's size.
    Images { unchecked: Image, checked: Image },
}

/// A boolean toggle. A press inside the bounds flips the value.
#[derive(Debug)]
pub struct CheckBox {
    base: WidgetBase,
    face: CheckBoxFace,
    checked: bool,
}

impl CheckBox {
    /// A square checkbox with generated art.
    pub fn new(id: impl Into<String>, size: f32) -> Self {
        Self {
            base: WidgetBase::new(id, size, size),
            face: CheckBoxFace::Drawn {
                box_color: Color::from_hex(BOX_COLOR),
                check_color: Color::from_hex(CHECK_COLOR),
            },
            checked: false,
        }
    }

    pub fn with_images(id: impl Into<String>, unchecked: Image, checked: Image) -> Self {
        let (width, height) = (unchecked.width() as f32, unchecked.height() as f32);
        Self {
            base: WidgetBase::new(id, width, height),
            face: CheckBoxFace::Images { unchecked, checked },
            checked: false,
        }
    }

    pub fn load_images(
        id: impl Into<String>,
        unchecked: impl AsRef<Path>,
        checked: impl AsRef<Path>,
    ) -> UiResult<Self> {
        Ok(Self::with_images(
            id,
            Image::load(unchecked)?,
            Image::load(checked)?,
        ))
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.base.set_position(x, y);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    pub fn on_event(mut self, event_type: EventType, handler: EventHandler) -> Self {
        self.base.register_event_handler(event_type, handler);
        self
    }

    /// Handler for the press that toggled the value.
    pub fn on_toggle(self, handler: impl FnMut(&Event) -> UiResult<()> + 'static) -> Self {
        self.on_event(EventType::ButtonDown, Box::new(handler))
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.base.mark_dirty();
        }
    }
}

impl Widget for CheckBox {
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
            Event::ButtonDown(mouse) if self.base.contains(mouse.x, mouse.y) => {
                self.set_checked(!self.checked);
                tracing::debug!("Checkbox '{}' is now {}", self.base.id(), self.checked);
                self.base.invoke_handler(event)
            }
            _ => Ok(()),
        }
    }

    fn paint(&self) -> UiResult<Image> {
        match &self.face {
            CheckBoxFace::Drawn {
                box_color,
                check_color,
            } => {
                let (width, height) = self.base.pixel_size();
                let mut image = Image::filled(width, height, *box_color);
                image.draw_rect(0, 0, width, height, Color::BLACK);

                if self.checked {
                    let (w, h) = (width as i32, height as i32);
                    image.draw_line(w / 5, h / 2, w * 2 / 5, h * 3 / 4, *check_color);
                    image.draw_line(w * 2 / 5, h * 3 / 4, w * 4 / 5, h / 4, *check_color);
                }
                Ok(image)
            }
            CheckBoxFace::Images { unchecked, checked } => {
                let face = if self.checked { checked } else { unchecked };
                Ok(face.clone())
            }
        }
    }

    fn data(&self) -> UiResult<WidgetData> {
        Ok(WidgetData::Bool(self.checked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_presses_toggle_back() {
        let mut cb = CheckBox::new("cb", 20.0);
        assert_eq!(cb.data().unwrap(), WidgetData::Bool(false));

        cb.handle_event(&Event::button_down(5.0, 5.0)).unwrap();
        assert_eq!(cb.data().unwrap(), WidgetData::Bool(true));

        cb.handle_event(&Event::button_down(5.0, 5.0)).unwrap();
        assert_eq!(cb.data().unwrap(), WidgetData::Bool(false));
    }

    #[test]
    fn test_press_outside_does_not_toggle() {
        let mut cb = CheckBox::new("cb", 20.0).with_position(100.0, 100.0);
        cb.handle_event(&Event::button_down(5.0, 5.0)).unwrap();
        assert!(!cb.is_checked());
    }

    #[test]
    fn test_release_is_ignored() {
        let mut cb = CheckBox::new("cb", 20.0);
        cb.base_mut().store_paint(Image::new(1, 1));
        cb.handle_event(&Event::button_up(5.0, 5.0)).unwrap();
        assert!(!cb.is_dirty());
    }

    #[test]
    fn test_checked_art_draws_mark() {
        let cb = CheckBox::new("cb", 20.0);
        let unchecked = cb.paint().unwrap();
        let checked = cb.with_checked(true).paint().unwrap();
        assert_ne!(unchecked, checked);
    }

    #[test]
    fn test_image_faces() {
        let cb = CheckBox::with_images(
            "cb",
            Image::filled(6, 6, Color::WHITE),
            Image::filled(6, 6, Color::GREEN),
        )
        .with_checked(true);
        assert_eq!(cb.paint().unwrap().pixel(3, 3), Some(Color::GREEN.to_rgba8()));
    }
}
