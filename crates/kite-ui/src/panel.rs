//! Panels: ordered containers of widgets and nested panels.
//!
//! Children are stored in insertion order, which is also their draw order.
//! Positions are absolute window coordinates; a panel converts a child's
//! offset into an absolute position when the child is added, and moving a
//! panel moves everything inside it.

use std::fmt;

use kite_core::geometry::{Pos, Rect, Size};
use kite_core::profiling::profile_function;
use kite_render::{Color, Surface};

use crate::error::{ErrorCollector, UiResult};
use crate::event::Event;
use crate::panel_id::PanelId;
use crate::widget::Widget;

/// How a panel positions the children added to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelLayout {
    /// Each child keeps its own offset from the panel origin.
    #[default]
    Fixed,
    /// Children stack top to bottom.
    Vertical,
    /// Children stack left to right.
    Horizontal,
}

/// Location of a widget inside a window's panel tree.
///
/// `panels` lists panel indices from the top-level panel downwards; `widget`
/// indexes the innermost panel's widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPath {
    pub panels: Vec<usize>,
    pub widget: usize,
}

pub struct Panel {
    id: String,
    panel_id: PanelId,
    bounds: Rect<f32>,
    background: Option<Color>,
    top_level: bool,
    layout: PanelLayout,
    dynamic_size: bool,
    /// Running offset along the stacking axis.
    cursor: f32,
    widgets: Vec<Box<dyn Widget>>,
    panels: Vec<Panel>,
}

impl Panel {
    /// A fixed-layout panel at `(x, y)`.
    pub fn new(id: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        let id = id.into();
        Self {
            panel_id: PanelId::new(&id),
            id,
            bounds: Rect::new(x, y, width, height),
            background: None,
            top_level: false,
            layout: PanelLayout::Fixed,
            dynamic_size: false,
            cursor: 0.0,
            widgets: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// An empty panel that stacks children vertically and grows to fit them.
    pub fn vertical(id: impl Into<String>) -> Self {
        Self::stacking(id, PanelLayout::Vertical)
    }

    /// An empty panel that stacks children horizontally and grows to fit them.
    pub fn horizontal(id: impl Into<String>) -> Self {
        Self::stacking(id, PanelLayout::Horizontal)
    }

    fn stacking(id: impl Into<String>, layout: PanelLayout) -> Self {
        let mut panel = Self::new(id, 0.0, 0.0, 0.0, 0.0);
        panel.layout = layout;
        panel.dynamic_size = true;
        panel
    }

    /// Offset inside the parent (or window position for top-level panels).
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Whether adding children grows the panel.
    pub fn with_dynamic_size(mut self, dynamic: bool) -> Self {
        self.dynamic_size = dynamic;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn panel_id(&self) -> PanelId {
        self.panel_id
    }

    pub fn bounds(&self) -> Rect<f32> {
        self.bounds
    }

    pub fn position(&self) -> Pos<f32> {
        self.bounds.position()
    }

    pub fn size(&self) -> Size<f32> {
        self.bounds.size()
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic_size
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    pub fn set_top_level(&mut self, top_level: bool) {
        self.top_level = top_level;
    }

    pub fn contains_coords(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Move the panel and its whole subtree.
    pub fn set_position(&mut self, x: f32, y: f32) {
        let dx = x - self.bounds.x;
        let dy = y - self.bounds.y;
        self.translate(dx, dy);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.bounds.x += dx;
        self.bounds.y += dy;
        for widget in &mut self.widgets {
            let pos = widget.position();
            widget.set_position(pos.x + dx, pos.y + dy);
        }
        for panel in &mut self.panels {
            panel.translate(dx, dy);
        }
    }

    /// Absolute position for a child with the given offset and extent, advancing
    /// the stacking cursor and growing the panel as the layout requires.
    fn place(&mut self, offset: Pos<f32>, extent: Size<f32>) -> Pos<f32> {
        let origin = self.bounds.position();
        let (pos, needed) = match self.layout {
            PanelLayout::Fixed => (
                origin + offset,
                Size::new(offset.x + extent.width, offset.y + extent.height),
            ),
            PanelLayout::Vertical => {
                let pos = Pos::new(origin.x, origin.y + self.cursor);
                self.cursor += extent.height;
                (pos, Size::new(extent.width, self.cursor))
            }
            PanelLayout::Horizontal => {
                let pos = Pos::new(origin.x + self.cursor, origin.y);
                self.cursor += extent.width;
                (pos, Size::new(self.cursor, extent.height))
            }
        };

        if self.dynamic_size {
            self.bounds.width = self.bounds.width.max(needed.width);
            self.bounds.height = self.bounds.height.max(needed.height);
        }
        pos
    }

    /// Take ownership of a widget and position it.
    ///
    /// In a fixed panel the widget's current position is read as an offset from
    /// the panel origin; stacking panels ignore it.
    pub fn add_widget(&mut self, widget: impl Widget) {
        self.add_boxed_widget(Box::new(widget));
    }

    pub fn add_boxed_widget(&mut self, mut widget: Box<dyn Widget>) {
        if self.widget(widget.id()).is_some() {
            tracing::warn!(
                "Panel '{}' already holds a widget '{}'; lookups by id find the first",
                self.id,
                widget.id()
            );
        }
        let pos = self.place(widget.position(), widget.size());
        widget.set_position(pos.x, pos.y);
        widget.base_mut().set_parent(Some(self.panel_id));
        tracing::trace!(
            "Panel '{}' placed widget '{}' at ({}, {})",
            self.id,
            widget.id(),
            pos.x,
            pos.y
        );
        self.widgets.push(widget);
    }

    /// Take ownership of a nested panel, placing it like a widget.
    pub fn add_panel(&mut self, mut panel: Panel) {
        self.warn_duplicate_ids(&panel);
        let pos = self.place(panel.position(), panel.size());
        panel.set_position(pos.x, pos.y);
        panel.top_level = false;
        self.panels.push(panel);
    }

    /// Drop every widget, keeping nested panels where they are.
    ///
    /// Stacking resumes after the furthest nested panel, and a dynamic panel
    /// shrinks to fit the panels that remain.
    pub fn clear_widgets(&mut self) {
        self.widgets.clear();

        let (mut width, mut height) = (0.0_f32, 0.0_f32);
        for panel in &self.panels {
            let b = panel.bounds();
            width = width.max(b.x + b.width - self.bounds.x);
            height = height.max(b.y + b.height - self.bounds.y);
        }

        self.cursor = match self.layout {
            PanelLayout::Fixed => 0.0,
            PanelLayout::Vertical => height,
            PanelLayout::Horizontal => width,
        };
        if self.dynamic_size {
            self.bounds.width = width;
            self.bounds.height = height;
        }
    }

    /// Ids of every widget in the subtree.
    pub fn widget_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.widgets.iter().map(|w| w.id()).collect();
        for panel in &self.panels {
            ids.extend(panel.widget_ids());
        }
        ids
    }

    fn warn_duplicate_ids(&self, incoming: &Panel) {
        for id in incoming.widget_ids() {
            if self.widget(id).is_some() {
                tracing::warn!(
                    "Panel '{}' gains a second widget '{}' from '{}'",
                    self.id,
                    id,
                    incoming.id
                );
            }
        }
    }

    /// Detach the widget with this id from the subtree.
    ///
    /// Remaining children keep their positions and the panel keeps its size.
    pub fn remove_widget(&mut self, id: &str) -> Option<Box<dyn Widget>> {
        if let Some(index) = self.widgets.iter().position(|w| w.id() == id) {
            let mut widget = self.widgets.remove(index);
            widget.base_mut().set_parent(None);
            return Some(widget);
        }
        self.panels.iter_mut().find_map(|p| p.remove_widget(id))
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.widgets
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut [Panel] {
        &mut self.panels
    }

    /// Find a widget anywhere in the subtree.
    pub fn widget(&self, id: &str) -> Option<&dyn Widget> {
        if let Some(widget) = self.widgets.iter().find(|w| w.id() == id) {
            return Some(&**widget);
        }
        self.panels.iter().find_map(|p| p.widget(id))
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut dyn Widget> {
        if let Some(index) = self.widgets.iter().position(|w| w.id() == id) {
            let widget: &mut dyn Widget = &mut *self.widgets[index];
            return Some(widget);
        }
        self.panels.iter_mut().find_map(|p| p.widget_mut(id))
    }

    /// Find a panel in the subtree, this one included.
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        if self.id == id {
            return Some(self);
        }
        self.panels.iter().find_map(|p| p.panel(id))
    }

    pub fn panel_mut(&mut self, id: &str) -> Option<&mut Panel> {
        if self.id == id {
            return Some(self);
        }
        self.panels.iter_mut().find_map(|p| p.panel_mut(id))
    }

    /// The widget that should receive input at `(x, y)`.
    ///
    /// Nested panels containing the point are searched first, in insertion
    /// order, then this panel's own widgets. The first match wins.
    pub fn find_widget_at(&self, x: f32, y: f32) -> Option<WidgetPath> {
        if !self.contains_coords(x, y) {
            return None;
        }

        for (index, panel) in self.panels.iter().enumerate() {
            if let Some(mut path) = panel.find_widget_at(x, y) {
                path.panels.insert(0, index);
                return Some(path);
            }
        }

        self.widgets
            .iter()
            .position(|w| w.contains_coords(x, y))
            .map(|widget| WidgetPath {
                panels: Vec::new(),
                widget,
            })
    }

    /// Follow nested panel indices from this panel.
    pub fn descendant(&self, path: &[usize]) -> Option<&Panel> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.panels.get(index)?.descendant(rest),
        }
    }

    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Panel> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.panels.get_mut(index)?.descendant_mut(rest),
        }
    }

    /// Forward an event to every widget and nested panel.
    ///
    /// Every child sees the event even if an earlier one fails.
    pub fn handle_event(&mut self, event: &Event) -> UiResult<()> {
        let mut errors = ErrorCollector::new();
        for widget in &mut self.widgets {
            errors.push(widget.handle_event(event));
        }
        for panel in &mut self.panels {
            errors.push(panel.handle_event(event));
        }
        errors.finish()
    }

    /// Background, then widgets in insertion order, then nested panels.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        profile_function!();

        if let Some(color) = self.background {
            surface.fill_rect(
                self.bounds.x.round() as i32,
                self.bounds.y.round() as i32,
                self.bounds.width.round() as u32,
                self.bounds.height.round() as u32,
                color,
            );
        }

        let mut errors = ErrorCollector::new();
        for widget in &mut self.widgets {
            errors.push(widget.draw(surface));
        }
        for panel in &mut self.panels {
            errors.push(panel.draw(surface));
        }
        errors.finish()
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("layout", &self.layout)
            .field("dynamic_size", &self.dynamic_size)
            .field("top_level", &self.top_level)
            .field(
                "widgets",
                &self.widgets.iter().map(|w| w.id()).collect::<Vec<_>>(),
            )
            .field("panels", &self.panels)
            .finish()
    }
}
