//! The top-level window: panels, input dispatch and listeners.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use kite_core::math::Vec2;
use kite_core::profiling::{self, profile_function, profile_scope};
use kite_input::{InputState, Key, MouseButton};
use kite_render::{Color, Font, Surface};

use crate::config::WindowConfig;
use crate::error::{ErrorCollector, UiError, UiResult};
use crate::event::{Event, EventType, MouseAction};
use crate::listeners::ListenerRegistry;
use crate::panel::{Panel, WidgetPath};
use crate::widget::{Widget, WidgetData};
use crate::widgets::{MENU_BAR_COLOR, MENU_BAR_HEIGHT};

/// Id of the menu bar panel created when [`WindowConfig::have_menu_bar`] is set.
pub const MENU_BAR_ID: &str = "menubar";

/// Owns the top-level panels and runs the per-frame update and draw.
///
/// Input from [`Window::update`] is hit-tested and delivered straight to the
/// widget under the cursor. When that changes the widget's value the window
/// emits [`Event::ValueChanged`] to listeners. Events posted on the inbound
/// channel are broadcast to every panel at the next update.
pub struct Window {
    config: WindowConfig,
    font: Font,
    panels: Vec<Panel>,
    left_pressed: bool,
    cursor: Vec2,
    focused: Option<String>,
    listeners: ListenerRegistry,
    inbound_tx: Sender<Event>,
    inbound_rx: Receiver<Event>,
}

impl Window {
    pub fn new(config: WindowConfig, font: Font) -> UiResult<Self> {
        let listeners = ListenerRegistry::new(config.listener_threads)?;
        let (inbound_tx, inbound_rx) = bounded(config.inbound_capacity);

        let mut window = Self {
            config,
            font,
            panels: Vec::new(),
            left_pressed: false,
            cursor: Vec2::ZERO,
            focused: None,
            listeners,
            inbound_tx,
            inbound_rx,
        };

        if window.config.have_menu_bar {
            let menu_bar = Panel::menu_bar(
                MENU_BAR_ID,
                0.0,
                0.0,
                window.config.width as f32,
                MENU_BAR_HEIGHT,
                Color::from_hex(MENU_BAR_COLOR),
            );
            window.add_panel(menu_bar);
        }

        tracing::info!(
            "Created window '{}' ({}x{})",
            window.config.title,
            window.config.width,
            window.config.height
        );
        Ok(window)
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// The font the window was created with, for building widgets.
    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn add_panel(&mut self, mut panel: Panel) {
        for id in panel.widget_ids() {
            if self.widget(id).is_some() {
                tracing::warn!(
                    "Window already holds a widget '{}'; panel '{}' adds another",
                    id,
                    panel.id()
                );
            }
        }
        panel.set_top_level(true);
        tracing::debug!("Added top-level panel '{}'", panel.id());
        self.panels.push(panel);
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Find a panel anywhere in the window.
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find_map(|p| p.panel(id))
    }

    pub fn panel_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find_map(|p| p.panel_mut(id))
    }

    pub fn menu_bar_mut(&mut self) -> Option<&mut Panel> {
        self.panel_mut(MENU_BAR_ID)
    }

    /// Id of the widget most recently found by hit-testing. A press that hits
    /// nothing clears it.
    pub fn focused_widget(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Locate the widget under `(x, y)`.
    ///
    /// Top-level panels are tried in the order they were added; the first one
    /// with a matching widget wins. A hit also becomes the focused widget.
    pub fn find_widget_for_input(&mut self, x: f32, y: f32) -> Option<WidgetPath> {
        profile_function!();

        let path = self.panels.iter().enumerate().find_map(|(index, panel)| {
            panel.find_widget_at(x, y).map(|mut path| {
                path.panels.insert(0, index);
                path
            })
        })?;

        if let Some(id) = self.widget_at(&path).map(|w| w.id().to_string()) {
            self.focused = Some(id);
        }
        Some(path)
    }

    pub fn widget_at(&self, path: &WidgetPath) -> Option<&dyn Widget> {
        let (&top, rest) = path.panels.split_first()?;
        let panel = self.panels.get(top)?.descendant(rest)?;
        panel.widgets().get(path.widget).map(|w| &**w)
    }

    pub fn widget_at_mut(&mut self, path: &WidgetPath) -> Option<&mut dyn Widget> {
        resolve_mut(&mut self.panels, path)
    }

    pub fn widget(&self, id: &str) -> Option<&dyn Widget> {
        self.panels.iter().find_map(|p| p.widget(id))
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut dyn Widget> {
        self.panels.iter_mut().find_map(|p| p.widget_mut(id))
    }

    /// Look up a widget and downcast it to its concrete type.
    pub fn widget_as<T: Widget>(&self, id: &str) -> Option<&T> {
        self.widget(id)?.as_any().downcast_ref::<T>()
    }

    pub fn widget_as_mut<T: Widget>(&mut self, id: &str) -> Option<&mut T> {
        self.widget_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// The current value of a widget.
    pub fn widget_data(&self, id: &str) -> UiResult<WidgetData> {
        self.widget(id)
            .ok_or_else(|| UiError::UnknownWidget { id: id.to_string() })?
            .data()
    }

    /// Process one frame of input.
    ///
    /// Mouse transitions, the first typed character and Backspace (with
    /// auto-repeat) are delivered to the widget under the cursor. Events
    /// posted on the inbound channel are then broadcast to all panels.
    pub fn update(&mut self, input: &InputState) -> UiResult<()> {
        profiling::new_frame();
        profile_function!();

        let mut errors = ErrorCollector::new();
        self.cursor = input.cursor();
        let (x, y) = (self.cursor.x, self.cursor.y);

        let pressed = input.is_button_pressed(MouseButton::Left);
        if pressed != self.left_pressed {
            self.left_pressed = pressed;
            let action = if pressed {
                MouseAction::Down
            } else {
                MouseAction::Up
            };
            let previous = if pressed { self.focused.take() } else { None };
            errors.push(self.deliver_at(x, y, |id| {
                Event::mouse(format!("{:?} on '{}'", action, id), x, y, action)
            }));
            if let Some(previous) = previous
                && self.focused.as_deref() != Some(previous.as_str())
            {
                errors.push(self.release_focus(&previous, x, y));
            }
        }

        if let Some(&c) = input.typed_chars().first() {
            errors.push(self.deliver_at(x, y, |_| Event::keyboard(c)));
        }

        if self.config.key_repeat.is_repeating(input, Key::Backspace) {
            errors.push(self.deliver_at(x, y, |_| Event::keyboard(Key::Backspace)));
        }

        errors.push(self.drain_inbound());
        errors.finish()
    }

    /// Deliver an event to the widget under `(x, y)`, emitting `ValueChanged`
    /// if its data changed.
    fn deliver_at(&mut self, x: f32, y: f32, make: impl FnOnce(&str) -> Event) -> UiResult<()> {
        let Some(path) = self.find_widget_for_input(x, y) else {
            tracing::trace!("No widget at ({}, {})", x, y);
            return Ok(());
        };
        let Some(widget) = resolve_mut(&mut self.panels, &path) else {
            return Ok(());
        };

        let id = widget.id().to_string();
        let event = make(&id);
        tracing::debug!("Delivering {} to '{}'", event.description(), id);

        let before = widget.data().ok();
        let result = widget.handle_event(&event);
        let after = widget.data().ok();

        if let Some(value) = after
            && before.as_ref() != Some(&value)
        {
            self.listeners.emit(&Event::value_changed(id, value));
        }
        result
    }

    /// Tell the previously targeted widget that a press landed elsewhere.
    fn release_focus(&mut self, id: &str, x: f32, y: f32) -> UiResult<()> {
        let Some(widget) = self.widget_mut(id) else {
            return Ok(());
        };
        tracing::debug!("Press at ({}, {}) moved focus away from '{}'", x, y, id);
        widget.handle_event(&Event::mouse(
            format!("Down outside '{}'", id),
            x,
            y,
            MouseAction::Down,
        ))
    }

    fn drain_inbound(&mut self) -> UiResult<()> {
        profile_scope!("drain_inbound");

        let mut errors = ErrorCollector::new();
        let pending: Vec<Event> = self.inbound_rx.try_iter().collect();
        for event in &pending {
            errors.push(self.handle_event(event));
        }
        errors.finish()
    }

    /// Broadcast an event through the window.
    ///
    /// Input and set-text events go to every panel; notifications go to the
    /// listeners registered for their type.
    pub fn handle_event(&mut self, event: &Event) -> UiResult<()> {
        match event {
            Event::ButtonDown(_) | Event::ButtonUp(_) | Event::Keyboard(_) | Event::SetText(_) => {
                self.broadcast(event)
            }
            Event::ValueChanged(_) | Event::Custom(_) => {
                self.emit_event(event);
                Ok(())
            }
        }
    }

    fn broadcast(&mut self, event: &Event) -> UiResult<()> {
        tracing::debug!("Broadcasting {}", event.description());
        let mut errors = ErrorCollector::new();
        for panel in &mut self.panels {
            errors.push(panel.handle_event(event));
        }
        errors.finish()
    }

    /// Draw every panel, then the cursor readout if enabled.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        profile_function!();

        surface.fill(self.config.background);

        let mut errors = ErrorCollector::new();
        for panel in &mut self.panels {
            errors.push(panel.draw(surface));
        }

        if self.config.show_cursor_position {
            let text = format!("{} {}", self.cursor.x.round(), self.cursor.y.round());
            let y = surface.size().height as f32 - self.font.line_height();
            surface.draw_text(&text, &self.font, 0, y.max(0.0) as i32);
        }

        errors.finish()
    }

    /// The window's fixed logical size, whatever the host offers.
    pub fn layout(&self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn add_event_listener(&mut self, event_type: EventType, sender: Sender<Event>) {
        self.listeners.add(event_type, sender);
    }

    pub fn remove_event_listener(&mut self, event_type: EventType, sender: &Sender<Event>) -> bool {
        self.listeners.remove(event_type, sender)
    }

    /// Send a copy of `event` to each listener for its type without blocking.
    pub fn emit_event(&self, event: &Event) {
        self.listeners.emit(event);
    }

    /// Sender for the inbound channel, for producers that may block when full.
    pub fn event_sender(&self) -> Sender<Event> {
        self.inbound_tx.clone()
    }

    /// Queue an event for the next update. Returns `false` if the inbound
    /// channel was full and the event was dropped.
    pub fn post_event(&self, event: Event) -> bool {
        match self.inbound_tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!("Inbound channel full, dropped {}", event.description());
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

fn resolve_mut<'a>(panels: &'a mut [Panel], path: &WidgetPath) -> Option<&'a mut dyn Widget> {
    let (&top, rest) = path.panels.split_first()?;
    let panel = panels.get_mut(top)?.descendant_mut(rest)?;
    let widget: &mut dyn Widget = &mut **panel.widgets_mut().get_mut(path.widget)?;
    Some(widget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, CheckBox};

    fn window() -> Window {
        Window::new(WindowConfig::new(200, 200, "test"), Font::default()).unwrap()
    }

    #[test]
    fn test_menu_bar_created_when_configured() {
        let mut window = Window::new(
            WindowConfig::new(300, 200, "menu").menu_bar(true),
            Font::default(),
        )
        .unwrap();
        let bar = window.menu_bar_mut().unwrap();
        assert_eq!(bar.size().width, 300.0);
        assert_eq!(bar.size().height, MENU_BAR_HEIGHT);
        assert!(bar.is_top_level());

        assert!(self::window().menu_bar_mut().is_none());
    }

    #[test]
    fn test_hit_sets_focused_widget() {
        let mut window = window();
        let mut panel = Panel::new("p", 0.0, 0.0, 100.0, 100.0);
        panel.add_widget(CheckBox::new("cb", 10.0).with_position(20.0, 20.0));
        window.add_panel(panel);

        assert!(window.find_widget_for_input(5.0, 5.0).is_none());
        assert_eq!(window.focused_widget(), None);

        let path = window.find_widget_for_input(25.0, 25.0).unwrap();
        assert_eq!(path, WidgetPath { panels: vec![0], widget: 0 });
        assert_eq!(window.focused_widget(), Some("cb"));
    }

    #[test]
    fn test_widget_data_lookup() {
        let mut window = window();
        let mut panel = Panel::vertical("p");
        panel.add_widget(CheckBox::new("cb", 10.0).with_checked(true));
        panel.add_widget(Button::text("b", "B", 10.0, 10.0, Font::default()));
        window.add_panel(panel);

        assert_eq!(window.widget_data("cb").unwrap(), WidgetData::Bool(true));
        assert!(matches!(window.widget_data("b"), Err(UiError::NoData { .. })));
        assert!(matches!(
            window.widget_data("nope"),
            Err(UiError::UnknownWidget { .. })
        ));
        assert!(window.widget_as::<CheckBox>("cb").is_some());
        assert!(window.widget_as::<Button>("cb").is_none());
    }

    #[test]
    fn test_post_event_drops_when_full() {
        let window = Window::new(
            WindowConfig::new(10, 10, "tiny").inbound_capacity(1),
            Font::default(),
        )
        .unwrap();
        assert!(window.post_event(Event::set_text("a")));
        assert!(!window.post_event(Event::set_text("b")));
    }

    #[test]
    fn test_layout_ignores_host_size() {
        assert_eq!(window().layout(1920, 1080), (200, 200));
    }
}
