//! Physical-space geometry of an instance, shared by painting and hit testing.

use canvasroot_core::{InstanceNode, ShapeKind};
use canvasroot_graphics::{Point, Rect};

/// Half-extent of the square click target around a label anchor, in logical units.
pub const LABEL_HIT_SLOP: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeGeometry {
    Rect(Rect),
    Circle { center: Point, radius: f32 },
    /// Text metrics are never measured; `slop` is the scaled half-extent.
    Label { anchor: Point, slop: f32 },
}

impl ShapeGeometry {
    /// Resolves `node` placed at the absolute logical `origin`, scaled by `ratio`.
    pub fn resolve(node: &InstanceNode, origin: Point, ratio: f32) -> Self {
        let anchor = origin.scale(ratio);
        let props = &node.props;
        match node.kind() {
            ShapeKind::Rect => ShapeGeometry::Rect(Rect::new(
                anchor.x,
                anchor.y,
                props.width.unwrap_or(0.0) * ratio,
                props.height.unwrap_or(0.0) * ratio,
            )),
            ShapeKind::Circle => ShapeGeometry::Circle {
                center: anchor,
                radius: props.radius.unwrap_or(0.0) * ratio,
            },
            ShapeKind::Label => ShapeGeometry::Label {
                anchor,
                slop: LABEL_HIT_SLOP * ratio,
            },
        }
    }

    /// Containment test in physical coordinates.
    ///
    /// Rect edges are inclusive, circles include their rim, label boxes exclude theirs.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            ShapeGeometry::Rect(rect) => rect.contains(point),
            ShapeGeometry::Circle { center, radius } => {
                point.distance_squared(center) <= radius * radius
            }
            ShapeGeometry::Label { anchor, slop } => {
                (point.x - anchor.x).abs() < slop && (point.y - anchor.y).abs() < slop
            }
        }
    }

    pub fn anchor(&self) -> Point {
        match *self {
            ShapeGeometry::Rect(rect) => rect.origin(),
            ShapeGeometry::Circle { center, .. } => center,
            ShapeGeometry::Label { anchor, .. } => anchor,
        }
    }
}
