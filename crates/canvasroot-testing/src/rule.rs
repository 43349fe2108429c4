use canvasroot_app_shell::{CanvasRoot, CanvasSettings, MountError, ShapeElement};
use canvasroot_core::{format_instance_tree, NodeId};
use canvasroot_graphics::Point;
use canvasroot_render_common::{DrawCommand, RecordingSurface, ShapeGeometry};
use web_time::{Duration, Instant};

/// A mounted canvas over a [`RecordingSurface`] with a virtual clock.
///
/// Time only moves when the test calls [`CanvasTestRule::advance`], so deferred
/// repaints fire exactly when the test says they should.
pub struct CanvasTestRule {
    root: CanvasRoot<RecordingSurface>,
    now: Instant,
}

impl CanvasTestRule {
    pub fn launch(elements: &[ShapeElement]) -> Result<Self, MountError> {
        Self::launch_with(elements, CanvasSettings::default())
    }

    pub fn launch_with(
        elements: &[ShapeElement],
        settings: CanvasSettings,
    ) -> Result<Self, MountError> {
        let root = CanvasRoot::mount(elements, RecordingSurface::new(0, 0), settings)?;
        Ok(Self {
            root,
            now: Instant::now(),
        })
    }

    pub fn update(&mut self, elements: &[ShapeElement]) {
        self.root.update(elements);
    }

    /// Clicks at a logical point, as if the pointer mapping already ran.
    pub fn click(&mut self, x: f32, y: f32) -> Option<NodeId> {
        self.root.click(Point::new(x, y), self.now)
    }

    /// Clicks at a client-space point through the viewport mapping.
    pub fn click_client(&mut self, x: f32, y: f32) -> Option<NodeId> {
        self.root.click_at(Point::new(x, y), self.now)
    }

    pub fn resize(&mut self, width: f32, height: f32, ratio: f32) -> bool {
        self.root.resize(width, height, ratio)
    }

    /// Moves the virtual clock forward and runs whatever became due.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.now += by;
        self.root.run_due_timers(self.now)
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn root(&self) -> &CanvasRoot<RecordingSurface> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut CanvasRoot<RecordingSurface> {
        &mut self.root
    }

    /// Commands since the most recent clear.
    pub fn frame(&self) -> &[DrawCommand] {
        self.root.surface().last_frame()
    }

    pub fn draws(&self) -> Vec<&DrawCommand> {
        self.root.surface().frame_draws()
    }

    /// Every label drawn in the current frame, in paint order.
    pub fn texts(&self) -> Vec<String> {
        self.frame()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Hit-tests without dispatching or drawing an indicator.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        self.root.container().hit_test(Point::new(x, y))
    }

    /// Logical geometry of an attached node.
    pub fn geometry(&self, node: NodeId) -> Option<ShapeGeometry> {
        let tree = self.root.container().tree();
        let origin = tree.absolute_origin(node)?;
        let instance = tree.get(node)?;
        Some(ShapeGeometry::resolve(instance, origin, 1.0))
    }

    pub fn dump_tree(&self) -> String {
        format_instance_tree(self.root.container().tree())
    }

    pub fn unmount(self) -> RecordingSurface {
        self.root.unmount()
    }
}

#[cfg(test)]
#[path = "tests/rule_tests.rs"]
mod tests;
