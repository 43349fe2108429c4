use crate::geometry::ShapeGeometry;
use canvasroot_core::{InstanceTree, NodeId};
use canvasroot_graphics::Point;

/// Resolves a logical point to the instance that should receive it.
///
/// Walks the same pre-order as the painter and keeps the last match, so later
/// siblings and descendants win over what they are drawn on top of.
pub fn hit_test(tree: &InstanceTree, point: Point, ratio: f32) -> Option<NodeId> {
    let physical = point.scale(ratio);
    let mut hit = None;
    tree.visit_preorder(|id, node, origin| {
        if ShapeGeometry::resolve(node, origin, ratio).contains(physical) {
            hit = Some(id);
        }
    });
    hit
}

