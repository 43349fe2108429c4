//! Common rendering contracts for canvasroot: the raster surface abstraction,
//! the full-repaint painter and the hit tester that mirrors it.

mod geometry;
mod hit_test;
mod painter;
mod recording;
mod surface;

pub use geometry::{ShapeGeometry, LABEL_HIT_SLOP};
pub use hit_test::hit_test;
pub use painter::{paint, scaled_font, PaintStyle, DEFAULT_FILL};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{RasterSurface, SurfaceError, SurfaceProvider};

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
