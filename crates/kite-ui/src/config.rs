//! Window configuration.

use kite_input::KeyRepeat;
use kite_render::Color;

pub const DEFAULT_INBOUND_CAPACITY: usize = 1000;
pub const DEFAULT_LISTENER_THREADS: usize = 2;
pub const DEFAULT_BACKGROUND: u32 = 0x111111;

/// Settings for a [`Window`](crate::Window).
///
/// # Example
///
/// ```
/// use kite_ui::WindowConfig;
///
/// let config = WindowConfig::new(800, 600, "Settings")
///     .menu_bar(true)
///     .show_cursor_position(true);
/// assert_eq!(config.inbound_capacity, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Create a menu bar panel along the top edge at construction.
    pub have_menu_bar: bool,
    pub background: Color,
    /// Draw the cursor coordinates in the bottom-left corner.
    pub show_cursor_position: bool,
    /// Capacity of the inbound event channel.
    pub inbound_capacity: usize,
    /// Worker threads delivering events to listeners.
    pub listener_threads: usize,
    /// Auto-repeat policy for Backspace.
    pub key_repeat: KeyRepeat,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Kite".to_string(),
            have_menu_bar: false,
            background: Color::from_hex(DEFAULT_BACKGROUND),
            show_cursor_position: false,
            inbound_capacity: DEFAULT_INBOUND_CAPACITY,
            listener_threads: DEFAULT_LISTENER_THREADS,
            key_repeat: KeyRepeat::default(),
        }
    }
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn menu_bar(mut self, enabled: bool) -> Self {
        self.have_menu_bar = enabled;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn show_cursor_position(mut self, enabled: bool) -> Self {
        self.show_cursor_position = enabled;
        self
    }

    pub fn inbound_capacity(mut self, capacity: usize) -> Self {
        self.inbound_capacity = capacity;
        self
    }

    pub fn listener_threads(mut self, threads: usize) -> Self {
        self.listener_threads = threads;
        self
    }

    pub fn key_repeat(mut self, repeat: KeyRepeat) -> Self {
        self.key_repeat = repeat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.background, Color::from_hex(0x111111));
        assert_eq!(config.inbound_capacity, 1000);
        assert_eq!(config.listener_threads, 2);
        assert!(!config.have_menu_bar);
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new(320, 200, "demo")
            .inbound_capacity(4)
            .listener_threads(1)
            .key_repeat(KeyRepeat::new(10, 2));
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.title, "demo");
        assert_eq!(config.inbound_capacity, 4);
        assert_eq!(config.key_repeat, KeyRepeat::new(10, 2));
    }
}
