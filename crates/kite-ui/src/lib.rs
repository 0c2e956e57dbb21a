//! Kite UI - retained-mode widgets for a 2D game loop
//!
//! This crate provides a small widget toolkit driven once per frame by a host:
//! - Panels with fixed, vertical and horizontal layouts, nestable to any depth
//! - Buttons, checkboxes, text inputs and a menu bar
//! - Hit-tested mouse and keyboard dispatch with per-widget dirty tracking
//! - A publish/subscribe listener registry fed on background tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use kite_input::{MouseButton, RawInput};
//! use kite_render::Font;
//! use kite_ui::{CheckBox, HeadlessRunner, Panel, Window, WindowConfig, WidgetData};
//!
//! let font = Font::default();
//! let mut window = Window::new(WindowConfig::new(200, 100, "demo"), font).unwrap();
//!
//! let mut panel = Panel::vertical("form").with_position(10.0, 10.0);
//! panel.add_widget(CheckBox::new("agree", 16.0));
//! window.add_panel(panel);
//!
//! // In the render loop the host calls update, draw and layout each frame.
//! let mut runner = HeadlessRunner::new(&mut window, 200, 100).unwrap();
//! runner.push(RawInput::CursorMoved { x: 15.0, y: 15.0 });
//! runner.push(RawInput::ButtonPressed(MouseButton::Left));
//! runner.run_frame(&mut window).unwrap();
//!
//! assert_eq!(window.widget_data("agree").unwrap(), WidgetData::Bool(true));
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod listeners;
pub mod panel;
pub mod panel_id;
pub mod widget;
pub mod widgets;
pub mod window;

pub use config::WindowConfig;
pub use error::{ErrorCollector, UiError, UiResult};
pub use event::{
    CustomEvent, Event, EventType, KeyInput, KeyboardEvent, MouseAction, MouseEvent,
    SetTextEvent, ValueChangedEvent,
};
pub use host::{Game, HeadlessRunner};
pub use listeners::ListenerRegistry;
pub use panel::{Panel, PanelLayout, WidgetPath};
pub use panel_id::PanelId;
pub use widget::{EventHandler, Widget, WidgetBase, WidgetData};
pub use widgets::{Button, ButtonFace, CheckBox, CheckBoxFace, TextInput};
pub use window::{MENU_BAR_ID, Window};
