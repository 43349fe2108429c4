//! Geometry primitives for the retained shape tree.
//!
//! Every value here is in a single unit space; whether that space is logical
//! (CSS pixels) or physical (raster buffer pixels) is decided by the caller.

mod font;
mod geometry;

pub use font::{FontSpec, DEFAULT_FONT, DEFAULT_FONT_SIZE};
pub use geometry::{Point, Rect, Size};
