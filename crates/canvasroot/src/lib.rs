#![deny(missing_docs)]

//! Retained tree of rectangles, circles and labels painted onto a 2D canvas.
//!
//! Describe the scene with [`ShapeElement`]s and mount it with
//! [`CanvasRoot::mount`], or feed mutation batches from your own diffing engine
//! through [`CanvasRoot::mount_commands`] and [`CanvasRoot::apply_mutations`].

/// Mount lifecycle, settings, viewport and element descriptions.
pub use canvasroot_app_shell::{
    sanitize_ratio, CanvasRoot, CanvasSettings, ClickIndicator, Container, DeferredTask,
    ElementReconciler, MountError, ShapeElement, TimerId, TimerQueue, Viewport,
    DEVICE_PIXEL_RATIO_ENV,
};

/// Shape model, instance tree and the host mutation contract.
pub use canvasroot_core::{
    apply_commands, format_instance_tree, log_instance_tree, Attachment, ClickEvent, ClickHandler,
    ClickRegistry, ClickToken, HostConfig, InstanceNode, InstanceTree, MutationCommand, NodeError,
    NodeId, NodeRef, PendingClick, ShapeKind, ShapeProps,
};

/// Geometry value types.
pub use canvasroot_graphics::{FontSpec, Point, Rect, Size};

/// Surface contracts, painter and hit tester.
pub use canvasroot_render_common::{
    hit_test, paint, DrawCommand, PaintStyle, RasterSurface, RecordingSurface, ShapeGeometry,
    SurfaceError, SurfaceProvider,
};

/// Software RGBA surface.
#[cfg(feature = "renderer-pixels")]
pub use canvasroot_render_pixels::PixelSurface;

/// Browser canvas surface and page mount.
#[cfg(feature = "web")]
pub mod web {
    pub use canvasroot_platform_web::{
        HtmlCanvasElement, WebCanvasProvider, WebCanvasRoot, WebCanvasSurface,
    };

    #[cfg(target_arch = "wasm32")]
    pub use canvasroot_platform_web::init_logging;

    use crate::{CanvasSettings, MountError, ShapeElement};

    /// Mounts `elements` into `canvas` with default settings.
    pub fn render(
        elements: &[ShapeElement],
        canvas: HtmlCanvasElement,
    ) -> Result<WebCanvasRoot, MountError> {
        WebCanvasRoot::mount(elements, canvas, CanvasSettings::default())
    }
}

/// Convenience imports for canvasroot applications.
pub mod prelude {
    pub use crate::{
        CanvasRoot, CanvasSettings, ClickEvent, MountError, NodeId, Point, Rect, ShapeElement,
        ShapeKind, ShapeProps, Size,
    };

    #[cfg(feature = "renderer-pixels")]
    pub use crate::PixelSurface;

    #[cfg(feature = "web")]
    pub use crate::web::{render, WebCanvasRoot};
}
