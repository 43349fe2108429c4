use canvasroot_graphics::{Point, Rect, Size};

/// Failure to obtain a drawable surface. Fatal at mount time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("2d drawing context is unavailable")]
    ContextUnavailable,
    #[error("platform error: {0}")]
    Platform(String),
}

/// Immediate-mode 2D drawing target.
///
/// All coordinates are physical buffer pixels. Colors and fonts are CSS strings;
/// surfaces that cannot interpret a value skip the draw instead of failing.
pub trait RasterSurface {
    /// Physical buffer size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reallocates the buffer. Contents are undefined until the next clear.
    fn resize(&mut self, width: u32, height: u32);

    /// Back to the identity transform.
    fn reset_transform(&mut self);

    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str);

    /// Draws `text` with its alphabetic baseline starting at `anchor`.
    fn fill_text(&mut self, text: &str, anchor: Point, font: &str, color: &str);
}

impl<S: RasterSurface + ?Sized> RasterSurface for Box<S> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn reset_transform(&mut self) {
        (**self).reset_transform()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        (**self).fill_rect(rect, color)
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        (**self).fill_circle(center, radius, color)
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font: &str, color: &str) {
        (**self).fill_text(text, anchor, font, color)
    }
}

/// Something a surface can be acquired from, such as a canvas element.
pub trait SurfaceProvider {
    type Surface: RasterSurface;

    /// Ratio reported by the host, before any settings override.
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Logical size the host lays the surface out at, if it knows one.
    fn logical_size(&self) -> Option<Size> {
        None
    }

    fn acquire(self) -> Result<Self::Surface, SurfaceError>;
}
