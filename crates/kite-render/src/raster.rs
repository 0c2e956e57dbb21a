//! CPU-side RGBA8 images.

use std::path::Path;

use kite_core::geometry::Size;

use crate::error::{RenderError, RenderResult};
use crate::{Color, Font, Surface};

/// An owned RGBA8 pixel buffer.
///
/// Widgets cache their rendered appearance in an `Image` and blit it onto the
/// frame surface; `Image` is also the surface the headless host renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Image {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_rgba8(); width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> RenderResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(RenderError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file (PNG) from disk.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let decoded = ::image::open(path).map_err(|e| RenderError::ImageLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| p.0).collect();
        tracing::debug!("Loaded image {} ({}x{})", path.display(), width, height);
        Self::from_pixels(width, height, pixels)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        ::image::save_buffer_with_format(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            ::image::ExtendedColorType::Rgba8,
            ::image::ImageFormat::Png,
        )
        .map_err(|e| RenderError::ImageSave {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x as i32, y as i32).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Source-over blend of `src` onto the pixel at `(x, y)`; out of bounds is ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, src: [u8; 4]) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.pixels[i] = match src[3] {
            0 => return,
            255 => src,
            alpha => blend(self.pixels[i], src, alpha),
        };
    }
}

fn blend(dst: [u8; 4], src: [u8; 4], alpha: u8) -> [u8; 4] {
    let a = alpha as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    let out_alpha = a + (dst[3] as u32 * inv + 127) / 255;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        out_alpha.min(255) as u8,
    ]
}

impl Surface for Image {
    fn size(&self) -> Size<u32> {
        Size::new(self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        let px = color.to_rgba8();
        self.pixels.iter_mut().for_each(|p| *p = px);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let px = color.to_rgba8();
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i32).min(self.width as i32);
        let y1 = (y + height as i32).min(self.height as i32);

        for py in y0..y1 {
            for px_x in x0..x1 {
                self.blend_pixel(px_x, py, px);
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let px = color.to_rgba8();
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (x0, y0);

        loop {
            self.blend_pixel(cx, cy, px);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    fn blit(&mut self, image: &Image, x: i32, y: i32) {
        for sy in 0..image.height as i32 {
            let row = sy as usize * image.width as usize;
            for sx in 0..image.width as i32 {
                self.blend_pixel(x + sx, y + sy, image.pixels[row + sx as usize]);
            }
        }
    }

    fn draw_text(&mut self, text: &str, font: &Font, x: i32, y: i32) {
        font.rasterize(self, text, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut image = Image::new(4, 4);
        image.fill_rect(2, 2, 10, 10, Color::RED);

        assert_eq!(image.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(image.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(4, 4), None);
    }

    #[test]
    fn test_blit_at_offset() {
        let mut target = Image::filled(8, 8, Color::BLACK);
        let stamp = Image::filled(2, 2, Color::WHITE);
        target.blit(&stamp, 3, 5);

        assert_eq!(target.pixel(3, 5), Some([255, 255, 255, 255]));
        assert_eq!(target.pixel(4, 6), Some([255, 255, 255, 255]));
        assert_eq!(target.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_blit_leaves_target() {
        let mut target = Image::filled(2, 2, Color::BLUE);
        target.blit(&Image::new(2, 2), 0, 0);
        assert_eq!(target, Image::filled(2, 2, Color::BLUE));
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut target = Image::filled(1, 1, Color::BLACK);
        target.blend_pixel(0, 0, [255, 255, 255, 128]);
        let px = target.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        assert!((127..=129).contains(&px[0]));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut image = Image::new(5, 5);
        image.draw_rect(0, 0, 5, 5, Color::WHITE);

        assert_eq!(image.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(image.pixel(4, 4), Some([255, 255, 255, 255]));
        assert_eq!(image.pixel(4, 0), Some([255, 255, 255, 255]));
        assert_eq!(image.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_from_pixels_checks_length() {
        let err = Image::from_pixels(2, 2, vec![[0; 4]; 3]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { len: 3, .. }));
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checked.png");

        let mut image = Image::filled(3, 2, Color::GREEN);
        image.blend_pixel(1, 1, [10, 20, 30, 255]);
        image.save_png(&path).unwrap();

        assert_eq!(Image::load(&path).unwrap(), image);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Image::load("does/not/exist.png").unwrap_err();
        assert!(matches!(err, RenderError::ImageLoad { .. }));
    }
}
