use canvasroot_core::{ClickEvent, ClickHandler, ShapeKind, ShapeProps};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Declarative description of one shape and its children.
#[derive(Clone)]
pub struct ShapeElement {
    pub(crate) kind: ShapeKind,
    pub(crate) key: Option<String>,
    pub(crate) props: ShapeProps,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) children: Vec<ShapeElement>,
}

impl ShapeElement {
    pub fn new(kind: ShapeKind, props: ShapeProps) -> Self {
        Self {
            kind,
            key: None,
            props,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ShapeKind::Rect, ShapeProps::rect(x, y, width, height))
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new(ShapeKind::Circle, ShapeProps::circle(x, y, radius))
    }

    pub fn label(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self::new(ShapeKind::Label, ShapeProps::label(x, y, text))
    }

    /// Distinguishes siblings of the same kind; a changed key rebuilds the subtree.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.props.color = Some(color.into());
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.props.font = Some(font.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.props.id = Some(id.into());
        self
    }

    /// Merges extra properties. Click tokens are ignored; use [`ShapeElement::on_click`].
    pub fn props(mut self, props: ShapeProps) -> Self {
        self.props.merge_from(ShapeProps {
            on_click: None,
            ..props
        });
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(RefCell::new(handler)));
        self
    }

    pub fn on_click_handler(mut self, handler: ClickHandler) -> Self {
        self.on_click = Some(handler);
        self
    }

    pub fn child(mut self, child: ShapeElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ShapeElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn shape_props(&self) -> &ShapeProps {
        &self.props
    }

    pub fn child_elements(&self) -> &[ShapeElement] {
        &self.children
    }
}

impl fmt::Debug for ShapeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeElement")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("props", &self.props)
            .field("on_click", &self.on_click.is_some())
            .field("children", &self.children)
            .finish()
    }
}
