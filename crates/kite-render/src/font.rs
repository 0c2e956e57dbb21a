//! Built-in bitmap font.
//!
//! Fonts are immutable handles shared by reference count: load one at startup
//! and pass clones into every widget constructor that draws text.

use std::path::Path;
use std::sync::Arc;

use noto_sans_mono_bitmap::{FontWeight, RasterHeight, get_raster, get_raster_width};

use crate::error::{RenderError, RenderResult};
use crate::{Color, Image};

/// Point size used when a caller does not pick one.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Debug)]
struct FontInner {
    height: RasterHeight,
    color: Color,
}

/// A shared, immutable font handle: glyph size plus text color.
#[derive(Debug, Clone)]
pub struct Font {
    inner: Arc<FontInner>,
}

impl Font {
    /// The built-in monospace font at the raster size closest to `size`.
    pub fn builtin(size: f32, color: Color) -> Self {
        Self {
            inner: Arc::new(FontInner {
                height: nearest_height(size),
                color,
            }),
        }
    }

    /// Resolve a font by path; an empty path selects the built-in font.
    pub fn load(path: impl AsRef<Path>, size: f32, color: Color) -> RenderResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self::builtin(size, color));
        }
        if !path.exists() {
            return Err(RenderError::FontNotFound(path.to_path_buf()));
        }
        Err(RenderError::UnsupportedFont(path.to_path_buf()))
    }

    pub fn color(&self) -> Color {
        self.inner.color
    }

    /// Rendered line height in pixels.
    pub fn line_height(&self) -> f32 {
        self.inner.height.val() as f32
    }

    /// Monospace advance in pixels.
    pub fn char_width(&self) -> f32 {
        get_raster_width(FontWeight::Regular, self.inner.height) as f32
    }

    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width()
    }

    /// Composite `text` into `image` with the glyph cell's top-left at `(x, y)`.
    ///
    /// Glyph intensity becomes the alpha of the font color; characters the font
    /// does not cover render as `?`.
    pub fn rasterize(&self, image: &mut Image, text: &str, x: i32, y: i32) {
        let [r, g, b, a] = self.inner.color.to_rgba8();
        let advance = self.char_width() as i32;

        for (i, ch) in text.chars().enumerate() {
            let raster = get_raster(ch, FontWeight::Regular, self.inner.height)
                .or_else(|| get_raster('?', FontWeight::Regular, self.inner.height));
            let Some(raster) = raster else {
                continue;
            };

            let x0 = x + i as i32 * advance;
            for (gy, row) in raster.raster().iter().enumerate() {
                for (gx, &intensity) in row.iter().enumerate() {
                    if intensity == 0 {
                        continue;
                    }
                    let alpha = (intensity as u32 * a as u32 / 255) as u8;
                    image.blend_pixel(x0 + gx as i32, y + gy as i32, [r, g, b, alpha]);
                }
            }
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::builtin(DEFAULT_FONT_SIZE, Color::WHITE)
    }
}

fn nearest_height(size: f32) -> RasterHeight {
    [
        RasterHeight::Size16,
        RasterHeight::Size20,
        RasterHeight::Size24,
        RasterHeight::Size32,
    ]
    .into_iter()
    .min_by(|a, b| {
        let da = (a.val() as f32 - size).abs();
        let db = (b.val() as f32 - size).abs();
        da.total_cmp(&db)
    })
    .unwrap_or(RasterHeight::Size16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Surface;

    #[test]
    fn test_line_height_snaps_to_raster_size() {
        assert_eq!(Font::builtin(16.0, Color::WHITE).line_height(), 16.0);
        assert_eq!(Font::builtin(19.0, Color::WHITE).line_height(), 20.0);
        assert_eq!(Font::builtin(100.0, Color::WHITE).line_height(), 32.0);
        assert_eq!(Font::builtin(4.0, Color::WHITE).line_height(), 16.0);
    }

    #[test]
    fn test_text_width_is_monospace() {
        let font = Font::default();
        assert_eq!(font.text_width("abc"), 3.0 * font.char_width());
        assert_eq!(font.text_width(""), 0.0);
    }

    #[test]
    fn test_empty_path_is_builtin() {
        let font = Font::load("", 20.0, Color::RED).unwrap();
        assert_eq!(font.line_height(), 20.0);
        assert_eq!(font.color(), Color::RED);
    }

    #[test]
    fn test_missing_font_file() {
        let err = Font::load("fonts/missing.ttf", 16.0, Color::WHITE).unwrap_err();
        assert!(matches!(err, RenderError::FontNotFound(_)));
    }

    #[test]
    fn test_clones_share_state() {
        let font = Font::default();
        let other = font.clone();
        assert!(Arc::ptr_eq(&font.inner, &other.inner));
    }

    #[test]
    fn test_text_leaves_ink() {
        let font = Font::builtin(16.0, Color::WHITE);
        let mut image = Image::filled(40, 20, Color::BLACK);
        image.draw_text("W", &font, 0, 0);

        let lit = (0..16)
            .flat_map(|y| (0..font.char_width() as u32).map(move |x| (x, y)))
            .filter(|&(x, y)| image.pixel(x, y).is_some_and(|p| p[0] > 0))
            .count();
        assert!(lit > 0);
    }
}
