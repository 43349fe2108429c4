use canvasroot_graphics::{Point, Rect, Size};

/// Logical size, device pixel ratio and on-screen placement of a surface.
///
/// The physical buffer is the logical size times the ratio, truncated to whole
/// pixels. Pointer positions are mapped through the single factor
/// `physical width / on-screen width`, never through the ratio a second time.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    logical: Size,
    ratio: f32,
    physical: (u32, u32),
    screen: Rect,
}

impl Viewport {
    pub fn new(width: f32, height: f32, ratio: f32) -> Self {
        let mut viewport = Self {
            logical: Size::default(),
            ratio: 1.0,
            physical: (0, 0),
            screen: Rect::default(),
        };
        viewport.resize(width, height, ratio);
        viewport
    }

    /// Applies a new logical size and ratio. The on-screen rect follows the
    /// logical size; its position is kept.
    ///
    /// Returns whether the physical buffer or the ratio changed.
    pub fn resize(&mut self, width: f32, height: f32, ratio: f32) -> bool {
        let width = non_negative(width);
        let height = non_negative(height);
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        let physical = (to_pixels(width * ratio), to_pixels(height * ratio));
        let changed = physical != self.physical || ratio != self.ratio;

        self.logical = Size::new(width, height);
        self.ratio = ratio;
        self.physical = physical;
        self.screen = Rect::new(self.screen.x, self.screen.y, width, height);
        changed
    }

    /// Where the surface currently sits on screen, in client coordinates.
    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.screen = rect;
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen
    }

    pub fn logical_size(&self) -> Size {
        self.logical
    }

    pub fn physical_size(&self) -> (u32, u32) {
        self.physical
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }

    /// Physical pixels per client unit along each axis.
    fn buffer_scale(&self) -> (f32, f32) {
        let axis = |physical: u32, on_screen: f32| {
            if on_screen > 0.0 {
                physical as f32 / on_screen
            } else {
                self.ratio
            }
        };
        (
            axis(self.physical.0, self.screen.width),
            axis(self.physical.1, self.screen.height),
        )
    }

    /// Maps a client-space pointer position into the painter's logical space.
    pub fn client_to_logical(&self, client: Point) -> Point {
        let (scale_x, scale_y) = self.buffer_scale();
        Point::new(
            (client.x - self.screen.x) * scale_x / self.ratio,
            (client.y - self.screen.y) * scale_y / self.ratio,
        )
    }

    /// Inverse of [`Viewport::client_to_logical`].
    pub fn logical_to_client(&self, logical: Point) -> Point {
        let (scale_x, scale_y) = self.buffer_scale();
        Point::new(
            self.screen.x + logical.x * self.ratio / scale_x,
            self.screen.y + logical.y * self.ratio / scale_y,
        )
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn to_pixels(value: f32) -> u32 {
    value.floor().clamp(0.0, u32::MAX as f32) as u32
}
