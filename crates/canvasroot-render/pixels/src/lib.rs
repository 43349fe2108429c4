//! Software raster surface for canvasroot, for headless hosts and snapshot tests.

mod color;
mod surface;

pub use color::{parse_css_color, ColorCache, Rgba8, COLOR_CACHE_CAPACITY};
pub use surface::PixelSurface;
