use crate::surface::{RasterSurface, SurfaceError, SurfaceProvider};
use canvasroot_graphics::{Point, Rect};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    ResetTransform,
    Clear,
    FillRect { rect: Rect, color: String },
    FillCircle { center: Point, radius: f32, color: String },
    FillText { text: String, anchor: Point, font: String, color: String },
}

impl DrawCommand {
    /// True for calls that put paint on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect { .. } | DrawCommand::FillCircle { .. } | DrawCommand::FillText { .. }
        )
    }
}

/// A headless surface that records every call in submission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands issued since the most recent clear, including that clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| *command == DrawCommand::Clear)
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Draw calls of [`RecordingSurface::last_frame`].
    pub fn frame_draws(&self) -> Vec<&DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|command| command.is_draw())
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| **command == DrawCommand::Clear)
            .count()
    }
}

impl RasterSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn reset_transform(&mut self) {
        self.commands.push(DrawCommand::ResetTransform);
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font: &str, color: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            anchor,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}

impl SurfaceProvider for RecordingSurface {
    type Surface = RecordingSurface;

    fn acquire(self) -> Result<Self::Surface, SurfaceError> {
        Ok(self)
    }
}
