//! Testing utilities and harness for canvasroot

pub mod assertions;
mod rule;

pub use rule::CanvasTestRule;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::rule::CanvasTestRule;
    pub use canvasroot_app_shell::{CanvasSettings, ShapeElement};
    pub use canvasroot_render_common::DrawCommand;
}
