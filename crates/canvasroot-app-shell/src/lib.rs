//! Mount lifecycle for canvasroot: the container that owns a tree and its
//! surface, viewport handling, deferred repaint timers and a positional
//! reconciler for element descriptions.

mod container;
mod element;
mod reconciler;
mod root;
mod settings;
mod timers;
mod viewport;

pub use container::Container;
pub use element::ShapeElement;
pub use reconciler::ElementReconciler;
pub use root::{CanvasRoot, MountError};
pub use settings::{sanitize_ratio, CanvasSettings, ClickIndicator, DEVICE_PIXEL_RATIO_ENV};
pub use timers::{DeferredTask, TimerId, TimerQueue};
pub use viewport::Viewport;
