//! Mount-time configuration.

use canvasroot_graphics::DEFAULT_FONT;
use canvasroot_render_common::{PaintStyle, DEFAULT_FILL};
use web_time::Duration;

/// Environment override for the device pixel ratio, e.g. `CANVASROOT_DEVICE_PIXEL_RATIO=2`.
pub const DEVICE_PIXEL_RATIO_ENV: &str = "CANVASROOT_DEVICE_PIXEL_RATIO";

/// Translucent disk drawn where a click landed until the next delayed repaint.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickIndicator {
    pub enabled: bool,
    /// Radius in logical pixels.
    pub radius: f32,
    pub color: String,
    /// Delay before the repaint that removes the disk.
    pub clear_after: Duration,
}

impl Default for ClickIndicator {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 5.0,
            color: "rgba(255, 0, 0, 0.5)".into(),
            clear_after: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSettings {
    /// Logical surface size used until the host reports a real one.
    pub initial_width: f32,
    pub initial_height: f32,
    /// Forces a device pixel ratio instead of the one the host reports.
    pub device_pixel_ratio: Option<f32>,
    pub click_indicator: ClickIndicator,
    pub default_fill: String,
    pub default_font: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            initial_width: 800.0,
            initial_height: 600.0,
            device_pixel_ratio: None,
            click_indicator: ClickIndicator::default(),
            default_fill: DEFAULT_FILL.into(),
            default_font: DEFAULT_FONT.into(),
        }
    }
}

impl CanvasSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus whatever the environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = Some(ratio);
        self
    }

    pub fn with_click_indicator(mut self, enabled: bool) -> Self {
        self.click_indicator.enabled = enabled;
        self
    }

    pub fn with_click_indicator_delay(mut self, delay: Duration) -> Self {
        self.click_indicator.clear_after = delay;
        self
    }

    pub fn with_click_indicator_style(mut self, radius: f32, color: impl Into<String>) -> Self {
        self.click_indicator.radius = radius;
        self.click_indicator.color = color.into();
        self
    }

    pub fn with_default_fill(mut self, color: impl Into<String>) -> Self {
        self.default_fill = color.into();
        self
    }

    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Applies [`DEVICE_PIXEL_RATIO_ENV`] if it holds a positive number.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DEVICE_PIXEL_RATIO_ENV) {
            Ok(value) => self.with_ratio_override(&value),
            Err(_) => self,
        }
    }

    fn with_ratio_override(mut self, value: &str) -> Self {
        match parse_ratio(value) {
            Some(ratio) => self.device_pixel_ratio = Some(ratio),
            None => log::warn!(
                "{} requested {:?}, but it is not a positive number; ignoring.",
                DEVICE_PIXEL_RATIO_ENV,
                value
            ),
        }
        self
    }

    pub fn paint_style(&self) -> PaintStyle {
        PaintStyle {
            default_fill: self.default_fill.clone(),
            default_font: self.default_font.clone(),
        }
    }

    /// The ratio to use when the host reports `reported`.
    pub fn effective_ratio(&self, reported: f32) -> f32 {
        self.device_pixel_ratio
            .and_then(sanitize_ratio)
            .or(sanitize_ratio(reported))
            .unwrap_or(1.0)
    }
}

fn parse_ratio(value: &str) -> Option<f32> {
    sanitize_ratio(value.trim().parse().ok()?)
}

/// Finite and strictly positive, or nothing.
pub fn sanitize_ratio(ratio: f32) -> Option<f32> {
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}
