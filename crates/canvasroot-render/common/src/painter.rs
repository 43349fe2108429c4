use crate::geometry::ShapeGeometry;
use crate::surface::RasterSurface;
use canvasroot_core::{InstanceNode, InstanceTree};
use canvasroot_graphics::{FontSpec, Point, DEFAULT_FONT, DEFAULT_FONT_SIZE};

/// Fill colour for shapes without one.
pub const DEFAULT_FILL: &str = "black";

/// Fallbacks for shapes that leave colour or font unset.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintStyle {
    pub default_fill: String,
    pub default_font: String,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            default_fill: DEFAULT_FILL.to_string(),
            default_font: DEFAULT_FONT.to_string(),
        }
    }
}

/// Clears `surface` and redraws every attached instance in document order.
///
/// Each instance produces exactly one draw call; nothing is culled. Returns the
/// number of draw calls issued.
pub fn paint<S>(tree: &InstanceTree, surface: &mut S, ratio: f32, style: &PaintStyle) -> usize
where
    S: RasterSurface + ?Sized,
{
    surface.clear();
    let mut draws = 0;
    tree.visit_preorder(|_, node, origin| {
        paint_node(node, origin, ratio, style, &mut *surface);
        draws += 1;
    });
    draws
}

fn paint_node<S>(node: &InstanceNode, origin: Point, ratio: f32, style: &PaintStyle, surface: &mut S)
where
    S: RasterSurface + ?Sized,
{
    let color = node.props.color.as_deref().unwrap_or(&style.default_fill);
    match ShapeGeometry::resolve(node, origin, ratio) {
        ShapeGeometry::Rect(rect) => surface.fill_rect(rect, color),
        ShapeGeometry::Circle { center, radius } => surface.fill_circle(center, radius, color),
        ShapeGeometry::Label { anchor, .. } => {
            let font = node.props.font.as_deref().unwrap_or(&style.default_font);
            let font = scaled_font(font, ratio);
            let text = node.props.text.as_deref().unwrap_or("");
            surface.fill_text(text, anchor, &font, color);
        }
    }
}

/// Multiplies the `px` size of a CSS font shorthand by `ratio`. Fonts without
/// a size are scaled from the default size.
pub fn scaled_font(font: &str, ratio: f32) -> String {
    if ratio == 1.0 {
        return font.to_string();
    }
    FontSpec::parse(font)
        .with_default_size(DEFAULT_FONT_SIZE)
        .scaled(ratio)
        .to_css()
}
