use std::fmt;

use kite_core::alloc::HashMap;
use kite_core::geometry::{Pos, Rect, Size};
use kite_render::Image;

use crate::error::UiResult;
use crate::event::{Event, EventType};
use crate::panel_id::PanelId;

/// Callback registered on a widget for one event type.
pub type EventHandler = Box<dyn FnMut(&Event) -> UiResult<()>>;

/// State shared by every widget.
pub struct WidgetBase {
    id: String,
    bounds: Rect<f32>,
    focused: bool,
    dirty: bool,
    parent: Option<PanelId>,
    handlers: HashMap<EventType, EventHandler>,
    cache: Option<Image>,
    redraw_count: u64,
}

impl WidgetBase {
    /// A new widget at the origin. It starts dirty so its first draw paints it.
    pub fn new(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            bounds: Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)),
            focused: false,
            dirty: true,
            parent: None,
            handlers: HashMap::default(),
            cache: None,
            redraw_count: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bounds(&self) -> Rect<f32> {
        self.bounds
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn position(&self) -> Pos<f32> {
        self.bounds.position()
    }

    pub fn size(&self) -> Size<f32> {
        self.bounds.size()
    }

    /// Size rounded to whole pixels, for painting.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.bounds.width.round() as u32,
            self.bounds.height.round() as u32,
        )
    }

    /// The cached appearance does not depend on position, so moving a widget
    /// leaves it clean.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.bounds = self.bounds.with_position(x, y);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.bounds.width = width.max(0.0);
        self.bounds.height = height.max(0.0);
        self.dirty = true;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Returns whether the focus flag changed. A change marks the widget dirty.
    pub fn set_focus(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        if changed {
            self.focused = focused;
            self.dirty = true;
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.dirty || self.cache.is_none()
    }

    pub fn parent(&self) -> Option<PanelId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<PanelId>) {
        self.parent = parent;
    }

    /// Replaces any handler already registered for `event_type`.
    pub fn register_event_handler(&mut self, event_type: EventType, handler: EventHandler) {
        self.handlers.insert(event_type, handler);
    }

    pub fn remove_event_handler(&mut self, event_type: EventType) -> bool {
        self.handlers.remove(&event_type).is_some()
    }

    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Run the handler registered for the event's type, if any.
    pub fn invoke_handler(&mut self, event: &Event) -> UiResult<()> {
        let Some(handler) = self.handlers.get_mut(&event.event_type()) else {
            return Ok(());
        };

        tracing::debug!("Widget '{}' handling {}", self.id, event.description());
        handler(event).inspect_err(|e| {
            tracing::error!("Handler on widget '{}' failed: {}", self.id, e);
        })
    }

    pub fn cached(&self) -> Option<&Image> {
        self.cache.as_ref()
    }

    /// Store a freshly painted appearance and clear the dirty flag.
    pub fn store_paint(&mut self, image: Image) {
        self.cache = Some(image);
        self.dirty = false;
        self.redraw_count += 1;
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("focused", &self.focused)
            .field("dirty", &self.dirty)
            .field("parent", &self.parent)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("redraw_count", &self.redraw_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_contains_is_closed_open() {
        let mut base = WidgetBase::new("w", 10.0, 5.0);
        base.set_position(10.0, 20.0);

        assert!(base.contains(10.0, 20.0));
        assert!(base.contains(19.9, 24.9));
        assert!(!base.contains(20.0, 22.0));
        assert!(!base.contains(15.0, 25.0));
        assert!(!base.contains(9.9, 22.0));
    }

    #[test]
    fn test_starts_dirty_and_paint_clears() {
        let mut base = WidgetBase::new("w", 2.0, 2.0);
        assert!(base.needs_repaint());

        base.store_paint(Image::new(2, 2));
        assert!(!base.is_dirty());
        assert!(!base.needs_repaint());
        assert_eq!(base.redraw_count(), 1);
    }

    #[test]
    fn test_moving_does_not_dirty() {
        let mut base = WidgetBase::new("w", 2.0, 2.0);
        base.store_paint(Image::new(2, 2));
        base.set_position(40.0, 40.0);
        assert!(!base.is_dirty());
    }

    #[test]
    fn test_focus_change_dirties_once() {
        let mut base = WidgetBase::new("w", 2.0, 2.0);
        base.store_paint(Image::new(2, 2));

        assert!(base.set_focus(true));
        assert!(base.is_dirty());

        base.store_paint(Image::new(2, 2));
        assert!(!base.set_focus(true));
        assert!(!base.is_dirty());
    }

    #[test]
    fn test_handler_invoked_for_matching_type_only() {
        let calls = Rc::new(Cell::new(0));
        let mut base = WidgetBase::new("w", 2.0, 2.0);
        let counter = calls.clone();
        base.register_event_handler(
            EventType::ButtonDown,
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            }),
        );

        base.invoke_handler(&Event::button_down(0.0, 0.0)).unwrap();
        base.invoke_handler(&Event::button_up(0.0, 0.0)).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_handler_error_is_returned() {
        let mut base = WidgetBase::new("w", 2.0, 2.0);
        base.register_event_handler(
            EventType::Keyboard,
            Box::new(|_| Err(UiError::handler("w", "rejected"))),
        );

        let err = base.invoke_handler(&Event::keyboard('a')).unwrap_err();
        assert!(matches!(err, UiError::Handler { .. }));
        assert!(base.remove_event_handler(EventType::Keyboard));
        assert!(base.invoke_handler(&Event::keyboard('a')).is_ok());
    }
}
