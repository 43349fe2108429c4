use crate::color::{blend_over, ColorCache, Rgba8};
use canvasroot_graphics::{FontSpec, Point, Rect, DEFAULT_FONT_SIZE};
use canvasroot_render_common::{RasterSurface, SurfaceError, SurfaceProvider};
use rusttype::{point, Font, Scale};

const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 framebuffer drawn on the CPU.
///
/// Rects and circles cover whole pixels by centre sampling. Text needs a font
/// loaded with [`PixelSurface::with_font`]; without one, labels are skipped.
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    colors: ColorCache,
    font: Option<Font<'static>>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; buffer_len(width, height)],
            colors: ColorCache::default(),
            font: None,
        }
    }

    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    /// Loads a TrueType/OpenType font from raw bytes.
    pub fn with_font_bytes(self, bytes: Vec<u8>) -> Result<Self, SurfaceError> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| SurfaceError::Platform("invalid font data".to_string()))?;
        Ok(self.with_font(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Raw RGBA8 rows, top to bottom.
    pub fn frame(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Pixels with any coverage at all.
    pub fn painted_pixels(&self) -> usize {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|pixel| pixel[3] != 0)
            .count()
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba8, coverage: f32) {
        if let Some(offset) = self.offset(x, y) {
            blend_over(&mut self.pixels[offset..offset + BYTES_PER_PIXEL], color, coverage);
        }
    }

    /// Pixel index range whose centres fall in `[start, end)`, clipped to `limit`.
    fn span(start: f32, end: f32, limit: u32) -> std::ops::Range<u32> {
        let first = (start - 0.5).ceil().max(0.0);
        let last = (end - 0.5).ceil().min(limit as f32);
        if first >= last {
            return 0..0;
        }
        first as u32..last as u32
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

impl RasterSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; buffer_len(width, height)];
    }

    fn reset_transform(&mut self) {}

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        let Some(color) = self.colors.resolve(color) else {
            return;
        };
        let (mut x0, mut x1) = (rect.x, rect.x + rect.width);
        let (mut y0, mut y1) = (rect.y, rect.y + rect.height);
        if x1 < x0 {
            std::mem::swap(&mut x0, &mut x1);
        }
        if y1 < y0 {
            std::mem::swap(&mut y0, &mut y1);
        }
        for y in Self::span(y0, y1, self.height) {
            for x in Self::span(x0, x1, self.width) {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        if radius <= 0.0 {
            return;
        }
        let Some(color) = self.colors.resolve(color) else {
            return;
        };
        let radius_squared = radius * radius;
        for y in Self::span(center.y - radius, center.y + radius + 1.0, self.height) {
            for x in Self::span(center.x - radius, center.x + radius + 1.0, self.width) {
                let sample = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if sample.distance_squared(center) <= radius_squared {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font: &str, color: &str) {
        let Some(face) = self.font.as_ref() else {
            log::debug!("no font loaded; label {text:?} skipped");
            return;
        };
        let Some(color) = self.colors.resolve(color) else {
            return;
        };
        let size = FontSpec::parse(font).size_px().unwrap_or(DEFAULT_FONT_SIZE);
        let mut coverage = Vec::new();
        for glyph in face.layout(text, Scale::uniform(size), point(anchor.x, anchor.y)) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, value| {
                let x = bounds.min.x + gx as i32;
                let y = bounds.min.y + gy as i32;
                if x >= 0 && y >= 0 {
                    coverage.push((x as u32, y as u32, value));
                }
            });
        }
        for (x, y, value) in coverage {
            self.blend(x, y, color, value);
        }
    }
}

impl SurfaceProvider for PixelSurface {
    type Surface = PixelSurface;

    fn acquire(self) -> Result<Self::Surface, SurfaceError> {
        if self.width == 0 || self.height == 0 {
            log::warn!("pixel surface acquired with an empty buffer");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = [255, 0, 0, 255];

    #[test]
    fn fill_rect_covers_pixel_centres() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), "red");
        assert_eq!(surface.painted_pixels(), 8);
        assert_eq!(surface.pixel(2, 3), Some(RED));
        assert_eq!(surface.pixel(5, 4), Some(RED));
        assert_eq!(surface.pixel(6, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fill_rect_is_clipped_to_buffer() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), "blue");
        assert_eq!(surface.painted_pixels(), 16);
    }

    #[test]
    fn fill_circle_stays_within_radius() {
        let mut surface = PixelSurface::new(20, 20);
        surface.fill_circle(Point::new(10.0, 10.0), 3.0, "black");
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(10, 14), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(14, 10), Some([0, 0, 0, 0]));
        let painted = surface.painted_pixels();
        assert!((24..=32).contains(&painted), "painted {painted}");
    }

    #[test]
    fn translucent_indicator_blends() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), "white");
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "rgba(255, 0, 0, 0.5)");
        assert_eq!(surface.pixel(0, 0), Some([255, 127, 127, 255]));
    }

    #[test]
    fn clear_and_resize_reset_contents() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), "red");
        surface.clear();
        assert_eq!(surface.painted_pixels(), 0);

        surface.resize(8, 2);
        assert_eq!(surface.size(), (8, 2));
        assert_eq!(surface.frame().len(), 8 * 2 * 4);
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn unknown_colour_and_missing_font_skip_draws() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), "sparkly");
        surface.fill_text("hi", Point::new(0.0, 3.0), "12px Arial", "black");
        assert_eq!(surface.painted_pixels(), 0);
        assert!(!surface.has_font());
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let result = PixelSurface::new(1, 1).with_font_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(SurfaceError::Platform(_))));
    }
}
