//! A small positional reconciler standing in for an external diffing engine.
//!
//! Elements are matched by index. A match with the same kind and key is
//! updated in place; anything else is rebuilt detached, spliced in ahead of the
//! old node, and the old node removed.

use crate::container::Container;
use crate::element::ShapeElement;
use canvasroot_core::{ClickHandler, ClickRegistry, ClickToken, HostConfig, NodeId, ShapeKind, ShapeProps};
use canvasroot_render_common::RasterSurface;

#[derive(Debug)]
struct MountedElement {
    node: NodeId,
    kind: ShapeKind,
    key: Option<String>,
    props: ShapeProps,
    children: Vec<MountedElement>,
}

impl MountedElement {
    fn release_tokens(&self, clicks: &mut ClickRegistry) {
        if let Some(token) = self.props.on_click {
            clicks.release(token);
        }
        for child in &self.children {
            child.release_tokens(clicks);
        }
    }
}

#[derive(Debug, Default)]
pub struct ElementReconciler {
    mounted: Vec<MountedElement>,
}

impl ElementReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the container in line with `elements` and commits.
    pub fn reconcile<S: RasterSurface>(
        &mut self,
        container: &mut Container<S>,
        elements: &[ShapeElement],
    ) {
        container.prepare_for_commit();
        let previous = std::mem::take(&mut self.mounted);
        self.mounted = reconcile_children(container, None, previous, elements);
        container.reset_after_commit();
    }

    /// Top-level nodes in document order.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.mounted.iter().map(|mounted| mounted.node).collect()
    }

    /// Forgets the mounted description and releases its click tokens.
    pub fn release(&mut self, clicks: &mut ClickRegistry) {
        for mounted in self.mounted.drain(..) {
            mounted.release_tokens(clicks);
        }
    }
}

fn reconcile_children<S: RasterSurface>(
    container: &mut Container<S>,
    parent: Option<NodeId>,
    previous: Vec<MountedElement>,
    elements: &[ShapeElement],
) -> Vec<MountedElement> {
    let mut mounted = Vec::with_capacity(elements.len());
    let mut previous = previous.into_iter();
    for element in elements {
        match previous.next().and_then(|old| still_mounted(container, old)) {
            Some(old) if old.kind == element.kind && old.key == element.key => {
                mounted.push(update(container, old, element));
            }
            Some(old) => {
                let fresh = build(container, element);
                match parent {
                    Some(parent) => container.insert_before(parent, fresh.node, old.node),
                    None => container.insert_in_container_before(fresh.node, old.node),
                }
                remove(container, parent, old);
                mounted.push(fresh);
            }
            None => {
                let fresh = build(container, element);
                let before = previous
                    .as_slice()
                    .iter()
                    .map(|later| later.node)
                    .find(|node| container.tree().contains(*node));
                match (parent, before) {
                    (Some(parent), Some(before)) => container.insert_before(parent, fresh.node, before),
                    (Some(parent), None) => container.append_child(parent, fresh.node),
                    (None, Some(before)) => container.insert_in_container_before(fresh.node, before),
                    (None, None) => container.append_to_container(fresh.node),
                }
                mounted.push(fresh);
            }
        }
    }
    for leftover in previous {
        if let Some(leftover) = still_mounted(container, leftover) {
            remove(container, parent, leftover);
        }
    }
    mounted
}

/// Drops a slot whose node an external batch already removed, releasing its
/// tokens, so the element is rebuilt ahead of the next surviving sibling.
fn still_mounted<S: RasterSurface>(
    container: &mut Container<S>,
    old: MountedElement,
) -> Option<MountedElement> {
    if container.tree().contains(old.node) {
        return Some(old);
    }
    log::debug!("#{} was removed outside the reconciler; rebuilding", old.node);
    old.release_tokens(container.clicks_mut());
    None
}

fn update<S: RasterSurface>(
    container: &mut Container<S>,
    mut old: MountedElement,
    element: &ShapeElement,
) -> MountedElement {
    let token = sync_handler(
        container.clicks_mut(),
        old.props.on_click,
        element.on_click.as_ref(),
    );
    let props = ShapeProps {
        on_click: token,
        ..element.props.clone()
    };
    if let Some(payload) = container.prepare_update(&old.props, &props) {
        container.commit_update(old.node, payload);
    }
    old.props = props;
    let children = std::mem::take(&mut old.children);
    old.children = reconcile_children(container, Some(old.node), children, &element.children);
    old
}

fn build<S: RasterSurface>(container: &mut Container<S>, element: &ShapeElement) -> MountedElement {
    let token = element
        .on_click
        .as_ref()
        .map(|handler| container.clicks_mut().register_handler(handler.clone()));
    let props = ShapeProps {
        on_click: token,
        ..element.props.clone()
    };
    let node = container.create_instance(element.kind, props.clone());
    let mut children = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let built = build(container, child);
        container.append_initial_child(node, built.node);
        children.push(built);
    }
    container.finalize_initial_children(node, &props);
    MountedElement {
        node,
        kind: element.kind,
        key: element.key.clone(),
        props,
        children,
    }
}

fn remove<S: RasterSurface>(container: &mut Container<S>, parent: Option<NodeId>, old: MountedElement) {
    match parent {
        Some(parent) => container.remove_child(parent, old.node),
        None => container.remove_from_container(old.node),
    }
    old.release_tokens(container.clicks_mut());
}

/// Keeps a shape's token stable across renders. A dropped handler leaves the
/// token in place with nothing behind it, since a merge cannot unset a field.
fn sync_handler(
    clicks: &mut ClickRegistry,
    token: Option<ClickToken>,
    handler: Option<&ClickHandler>,
) -> Option<ClickToken> {
    match (token, handler) {
        (Some(token), Some(handler)) => {
            clicks.replace_handler(token, handler.clone());
            Some(token)
        }
        (None, Some(handler)) => Some(clicks.register_handler(handler.clone())),
        (Some(token), None) => {
            clicks.clear_handler(token);
            Some(token)
        }
        (None, None) => None,
    }
}

#[cfg(test)]
#[path = "tests/reconciler_tests.rs"]
mod tests;
