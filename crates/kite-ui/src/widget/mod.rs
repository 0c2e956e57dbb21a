//! The widget capability contract.
//!
//! Every widget embeds a [`WidgetBase`] holding the state the toolkit manages
//! for it (bounds, focus, dirty flag, handlers, cached appearance) and
//! implements [`Widget`] on top of it. Widget-specific behavior lives in
//! [`Widget::handle_event`] and [`Widget::paint`]; drawing, hit-testing and
//! layout come from provided methods.

mod base;

pub use base::{EventHandler, WidgetBase};

use std::any::Any;

use kite_core::geometry::{Pos, Size};
use kite_core::profiling::profile_function;
use kite_render::{Image, Surface};

use crate::error::{UiError, UiResult};
use crate::event::{Event, EventType};
use crate::panel_id::PanelId;

/// A widget's retrievable value.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    Text(String),
    Bool(bool),
}

impl WidgetData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WidgetData::Text(text) => Some(text),
            WidgetData::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WidgetData::Bool(value) => Some(*value),
            WidgetData::Text(_) => None,
        }
    }
}

/// Base trait for all UI widgets.
pub trait Widget: Any {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Get widget type as Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get mutable widget type as Any for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// React to an event.
    ///
    /// Implementations update their state when the event is relevant, mark the
    /// widget dirty when its appearance changed and invoke the handler
    /// registered for the event type.
    fn handle_event(&mut self, event: &Event) -> UiResult<()>;

    /// Produce the widget's appearance at its current size.
    fn paint(&self) -> UiResult<Image>;

    /// The widget's value. Widgets without one report [`UiError::NoData`].
    fn data(&self) -> UiResult<WidgetData> {
        Err(UiError::NoData {
            widget: self.id().to_string(),
        })
    }

    /// Called at the start of every draw, before the dirty check.
    fn before_draw(&mut self) {}

    /// Blit the cached appearance, repainting it first if it is stale.
    fn draw(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        profile_function!();
        self.before_draw();

        if self.base().needs_repaint() {
            let image = self.paint()?;
            self.base_mut().store_paint(image);
        }

        let base = self.base();
        if let Some(image) = base.cached() {
            let pos = base.position();
            surface.blit(image, pos.x.round() as i32, pos.y.round() as i32);
        }
        Ok(())
    }

    fn id(&self) -> &str {
        self.base().id()
    }

    fn contains_coords(&self, x: f32, y: f32) -> bool {
        self.base().contains(x, y)
    }

    fn size(&self) -> Size<f32> {
        self.base().size()
    }

    fn position(&self) -> Pos<f32> {
        self.base().position()
    }

    /// Move the widget to absolute window coordinates.
    fn set_position(&mut self, x: f32, y: f32) {
        self.base_mut().set_position(x, y);
    }

    fn has_focus(&self) -> bool {
        self.base().has_focus()
    }

    fn is_dirty(&self) -> bool {
        self.base().is_dirty()
    }

    /// How many times the widget has been repainted.
    fn redraw_count(&self) -> u64 {
        self.base().redraw_count()
    }

    fn parent(&self) -> Option<PanelId> {
        self.base().parent()
    }

    fn register_event_handler(&mut self, event_type: EventType, handler: EventHandler) {
        self.base_mut().register_event_handler(event_type, handler);
    }
}
