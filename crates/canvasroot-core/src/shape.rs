//! Shape kinds and the property bag carried by every instance.

use crate::click::ClickToken;
use crate::NodeError;
use std::fmt;

/// The closed set of drawable kinds. An instance's kind never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Circle,
    Label,
}

impl ShapeKind {
    /// Resolves the tag an external engine uses for a host element.
    ///
    /// Both the bare names and the `canvas`-prefixed element names are accepted.
    pub fn from_type_tag(tag: &str) -> Result<Self, NodeError> {
        match tag {
            "rect" | "canvasRect" => Ok(ShapeKind::Rect),
            "circle" | "canvasCircle" => Ok(ShapeKind::Circle),
            "text" | "label" | "canvasText" => Ok(ShapeKind::Label),
            other => Err(NodeError::UnknownShapeType(other.to_string())),
        }
    }

    pub fn type_tag(self) -> &'static str {
        match self {
            ShapeKind::Rect => "canvasRect",
            ShapeKind::Circle => "canvasCircle",
            ShapeKind::Label => "canvasText",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Rect => "Rect",
            ShapeKind::Circle => "Circle",
            ShapeKind::Label => "Label",
        })
    }
}

/// Property bag of a shape instance.
///
/// Every field is optional so the same type doubles as an update payload:
/// [`ShapeProps::merge_from`] lets present fields win and keeps the rest.
/// `x` and `y` are offsets from the owning parent, never absolute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeProps {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub text: Option<String>,
    pub font: Option<String>,
    pub color: Option<String>,
    pub id: Option<String>,
    pub on_click: Option<ClickToken>,
}

impl ShapeProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new().at(x, y).size(width, height)
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new().at(x, y).radius(radius)
    }

    pub fn label(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self::new().at(x, y).text(text)
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn on_click(mut self, token: ClickToken) -> Self {
        self.on_click = Some(token);
        self
    }

    /// Offset from the parent; missing coordinates count as zero.
    pub fn offset(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Shallow merge: fields present in `patch` replace ours, absent ones are kept.
    pub fn merge_from(&mut self, patch: ShapeProps) {
        let ShapeProps {
            x,
            y,
            width,
            height,
            radius,
            text,
            font,
            color,
            id,
            on_click,
        } = patch;
        merge_field(&mut self.x, x);
        merge_field(&mut self.y, y);
        merge_field(&mut self.width, width);
        merge_field(&mut self.height, height);
        merge_field(&mut self.radius, radius);
        merge_field(&mut self.text, text);
        merge_field(&mut self.font, font);
        merge_field(&mut self.color, color);
        merge_field(&mut self.id, id);
        merge_field(&mut self.on_click, on_click);
    }

    pub fn merged(mut self, patch: ShapeProps) -> Self {
        self.merge_from(patch);
        self
    }
}

fn merge_field<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
