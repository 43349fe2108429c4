//! Browser platform for canvasroot.
//!
//! [`WebCanvasSurface`] draws through a `CanvasRenderingContext2d`, and
//! [`WebCanvasRoot`] mounts a tree into a `<canvas>` element, keeping its buffer
//! sized to the host on window resize and routing canvas clicks to the hit shape.

mod mount;
mod surface;

pub use mount::WebCanvasRoot;
pub use surface::{WebCanvasProvider, WebCanvasSurface};
pub use web_sys::HtmlCanvasElement;

/// Routes `log` output to the browser console and panics to `console.error`.
///
/// Safe to call more than once; later calls leave the first logger in place.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}
