use kite_core::geometry::Size;

use crate::{Color, Font, Image};

/// A 2D raster target the UI draws into.
///
/// Coordinates are window pixels with the origin in the top-left corner.
/// Implementations clip everything that falls outside their bounds.
pub trait Surface {
    fn size(&self) -> Size<u32>;

    /// Overwrite the whole surface with `color`.
    fn fill(&mut self, color: Color);

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    /// Draw a one pixel wide line, both endpoints included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);

    /// Composite `image` with its top-left corner at `(x, y)`.
    fn blit(&mut self, image: &Image, x: i32, y: i32);

    /// Draw `text` on a single line with the glyph cell's top-left at `(x, y)`.
    fn draw_text(&mut self, text: &str, font: &Font, x: i32, y: i32);

    /// Outline of a `width` x `height` box.
    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i32 - 1;
        let bottom = y + height as i32 - 1;
        self.draw_line(x, y, right, y, color);
        self.draw_line(right, y, right, bottom, color);
        self.draw_line(right, bottom, x, bottom, color);
        self.draw_line(x, bottom, x, y, color);
    }
}
