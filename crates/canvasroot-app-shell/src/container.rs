use crate::settings::ClickIndicator;
use crate::viewport::Viewport;
use canvasroot_core::{
    ClickEvent, ClickRegistry, HostConfig, InstanceTree, NodeId, PendingClick, ShapeKind,
    ShapeProps,
};
use canvasroot_graphics::{Point, Size};
use canvasroot_render_common::{hit_test, paint, PaintStyle, RasterSurface};

/// The mounted tree together with the surface it paints onto.
///
/// Mutations on top-level children repaint immediately; nested mutations wait
/// for [`HostConfig::reset_after_commit`].
pub struct Container<S: RasterSurface> {
    tree: InstanceTree,
    surface: S,
    viewport: Viewport,
    style: PaintStyle,
    clicks: ClickRegistry,
    repaints: usize,
}

impl<S: RasterSurface> Container<S> {
    pub fn new(mut surface: S, viewport: Viewport, style: PaintStyle) -> Self {
        let (width, height) = viewport.physical_size();
        surface.resize(width, height);
        surface.reset_transform();
        Self {
            tree: InstanceTree::new(),
            surface,
            viewport,
            style,
            clicks: ClickRegistry::new(),
            repaints: 0,
        }
    }

    pub fn tree(&self) -> &InstanceTree {
        &self.tree
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn clicks(&self) -> &ClickRegistry {
        &self.clicks
    }

    pub fn clicks_mut(&mut self) -> &mut ClickRegistry {
        &mut self.clicks
    }

    /// Full repaints performed so far.
    pub fn repaint_count(&self) -> usize {
        self.repaints
    }

    pub fn repaint(&mut self) -> usize {
        self.repaints += 1;
        paint(
            &self.tree,
            &mut self.surface,
            self.viewport.device_pixel_ratio(),
            &self.style,
        )
    }

    /// Resizes the buffer, resets the transform and repaints. Returns whether
    /// the physical buffer or the ratio changed.
    pub fn resize(&mut self, logical: Size, ratio: f32) -> bool {
        let changed = self.viewport.resize(logical.width, logical.height, ratio);
        let (width, height) = self.viewport.physical_size();
        self.surface.resize(width, height);
        self.surface.reset_transform();
        self.repaint();
        changed
    }

    pub fn hit_test(&self, logical: Point) -> Option<NodeId> {
        hit_test(&self.tree, logical, self.viewport.device_pixel_ratio())
    }

    /// Hit-tests `logical` and resolves the winner's click handler without
    /// running it.
    pub fn resolve_click(&self, logical: Point) -> Option<(NodeId, Option<PendingClick>)> {
        let node = self.hit_test(logical)?;
        let props = &self.tree.get(node)?.props;
        let pending = props.on_click.and_then(|token| {
            let event = ClickEvent {
                node,
                id: props.id.clone(),
                point: logical,
            };
            let pending = self.clicks.pending(token, event);
            if pending.is_none() {
                log::trace!("click on #{node} has no live handler");
            }
            pending
        });
        Some((node, pending))
    }

    /// Hit-tests `logical` and runs the winner's click handler, if any.
    pub fn dispatch_click(&self, logical: Point) -> Option<NodeId> {
        let (node, pending) = self.resolve_click(logical)?;
        if let Some(pending) = pending {
            pending.run();
        }
        Some(node)
    }

    pub fn draw_click_indicator(&mut self, logical: Point, indicator: &ClickIndicator) {
        let ratio = self.viewport.device_pixel_ratio();
        self.surface
            .fill_circle(logical.scale(ratio), indicator.radius * ratio, &indicator.color);
    }
}

impl<S: RasterSurface> HostConfig for Container<S> {
    fn create_instance(&mut self, kind: ShapeKind, props: ShapeProps) -> NodeId {
        self.tree.create_instance(kind, props)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    fn append_to_container(&mut self, child: NodeId) {
        if self.tree.append_to_container(child) {
            self.repaint();
        }
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        self.tree.insert_before(parent, child, before);
    }

    fn insert_in_container_before(&mut self, child: NodeId, before: NodeId) {
        if self.tree.insert_in_container_before(child, before) {
            self.repaint();
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.remove_child(parent, child);
    }

    fn remove_from_container(&mut self, child: NodeId) {
        if self.tree.remove_from_container(child) {
            self.repaint();
        }
    }

    fn commit_update(&mut self, node: NodeId, payload: ShapeProps) {
        self.tree.update_properties(node, payload);
    }

    fn clear_container(&mut self) {
        self.tree.clear_container();
        self.surface.clear();
    }

    fn detach_deleted_instance(&mut self, node: NodeId) {
        self.tree.detach_deleted_instance(node);
    }

    fn reset_after_commit(&mut self) {
        self.repaint();
    }
}

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod tests;
