use canvasroot_graphics::{Point, Rect, Size};
use canvasroot_render_common::{RasterSurface, SurfaceError, SurfaceProvider};
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` element and its 2D context.
pub struct WebCanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl WebCanvasSurface {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

fn warn_on_js_error(operation: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("canvas {operation} failed: {err:?}");
    }
}

impl RasterSurface for WebCanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Assigning the same size still wipes the bitmap, so skip no-ops.
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn reset_transform(&mut self) {
        warn_on_js_error(
            "set_transform",
            self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        );
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        warn_on_js_error(
            "arc",
            self.context.arc(
                f64::from(center.x),
                f64::from(center.y),
                f64::from(radius.max(0.0)),
                0.0,
                2.0 * PI,
            ),
        );
        self.context.fill();
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font: &str, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.set_font(font);
        warn_on_js_error(
            "fill_text",
            self.context
                .fill_text(text, f64::from(anchor.x), f64::from(anchor.y)),
        );
    }
}

/// Acquires a [`WebCanvasSurface`] from a canvas element.
pub struct WebCanvasProvider {
    canvas: HtmlCanvasElement,
}

impl WebCanvasProvider {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Looks the canvas up by element id in the current document.
    pub fn from_element_id(id: &str) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SurfaceError::Platform("no document".into()))?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::Platform(format!("no element with id `{id}`")))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Platform(format!("element `{id}` is not a canvas")))?;
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl SurfaceProvider for WebCanvasProvider {
    type Surface = WebCanvasSurface;

    fn device_pixel_ratio(&self) -> f32 {
        web_sys::window()
            .map(|window| window.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }

    fn logical_size(&self) -> Option<Size> {
        host_logical_size()
    }

    fn acquire(self) -> Result<Self::Surface, SurfaceError> {
        let context = self
            .canvas
            .get_context("2d")
            .map_err(|err| SurfaceError::Platform(format!("{err:?}")))?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        Ok(WebCanvasSurface {
            canvas: self.canvas,
            context,
        })
    }
}

/// Logical size the canvas should occupy: the window's inner size.
pub(crate) fn host_logical_size() -> Option<Size> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64();
    let height = window.inner_height().ok()?.as_f64();
    inner_size(width, height)
}

/// Accepts `innerWidth`/`innerHeight` only when both are finite and positive.
pub(crate) fn inner_size(width: Option<f64>, height: Option<f64>) -> Option<Size> {
    let (width, height) = (width?, height?);
    let usable = |value: f64| value.is_finite() && value > 0.0;
    (usable(width) && usable(height)).then(|| Size::new(width as f32, height as f32))
}

/// Pins the element's CSS box to the logical size so the backing buffer maps
/// onto it at the device pixel ratio.
pub(crate) fn apply_css_size(canvas: &HtmlCanvasElement, size: Size) {
    let style = canvas.style();
    warn_on_js_error(
        "style width",
        style.set_property("width", &format!("{}px", size.width)),
    );
    warn_on_js_error(
        "style height",
        style.set_property("height", &format!("{}px", size.height)),
    );
}
