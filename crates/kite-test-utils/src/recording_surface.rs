//! A [`Surface`] that records draw calls instead of rasterizing them.

use std::sync::Arc;

use kite_core::geometry::Size;
use kite_render::{Color, Font, Image, Surface};
use parking_lot::Mutex;

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill {
        color: Color,
    },
    FillRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
    },
    Blit {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
    },
}

/// Records every call made against it.
///
/// Clones share the same call log, so a test can keep one handle while the
/// code under test draws through another.
///
/// # Example
///
/// ```rust
/// use kite_render::{Color, Surface};
/// use kite_test_utils::RecordingSurface;
///
/// let recorder = RecordingSurface::new(800, 600);
/// let mut surface = recorder.clone();
/// surface.fill(Color::BLACK);
///
/// assert_eq!(recorder.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size<u32>,
    calls: Arc<Mutex<Vec<DrawCall>>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn blits(&self) -> Vec<(i32, i32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Blit { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn count_blits(&self) -> usize {
        self.blits().len()
    }

    pub fn count_fill_rects(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, DrawCall::FillRect { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: DrawCall) {
        self.calls.lock().push(call);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size<u32> {
        self.size
    }

    fn fill(&mut self, color: Color) {
        self.record(DrawCall::Fill { color });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        self.record(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.record(DrawCall::Line {
            from: (x0, y0),
            to: (x1, y1),
            color,
        });
    }

    fn blit(&mut self, image: &Image, x: i32, y: i32) {
        self.record(DrawCall::Blit {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });
    }

    fn draw_text(&mut self, text: &str, _font: &Font, x: i32, y: i32) {
        self.record(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
