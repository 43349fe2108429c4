//! The retained instance tree.
//!
//! Instances live in an arena keyed by [`NodeId`]. Ownership runs strictly top
//! down through `children`; the `parent` slot is a plain id used only to detach
//! a node before it is moved or removed.

use crate::shape::{ShapeKind, ShapeProps};
use crate::NodeId;
use canvasroot_graphics::Point;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type ChildList = SmallVec<[NodeId; 4]>;

/// Where an instance currently hangs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Attachment {
    #[default]
    Detached,
    /// A top-level child of the container.
    Root,
    Child(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstanceNode {
    kind: ShapeKind,
    pub props: ShapeProps,
    parent: Attachment,
    children: ChildList,
}

impl InstanceNode {
    fn new(kind: ShapeKind, props: ShapeProps) -> Self {
        Self {
            kind,
            props,
            parent: Attachment::Detached,
            children: ChildList::new(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn parent(&self) -> Attachment {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Default)]
pub struct InstanceTree {
    nodes: FxHashMap<NodeId, InstanceNode>,
    roots: ChildList,
    next_id: NodeId,
}

impl InstanceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a parentless, childless instance. Ids are never reused.
    pub fn create_instance(&mut self, kind: ShapeKind, props: ShapeProps) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, InstanceNode::new(kind, props));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&InstanceNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut InstanceNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live instances, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Attachment {
        self.nodes
            .get(&id)
            .map(|node| node.parent)
            .unwrap_or(Attachment::Detached)
    }

    /// Sum of the offsets of `id` and all its ancestors, in logical units.
    pub fn absolute_origin(&self, id: NodeId) -> Option<Point> {
        let mut node = self.nodes.get(&id)?;
        let mut origin = Point::ZERO;
        loop {
            let (x, y) = node.props.offset();
            origin = origin + Point::new(x, y);
            match node.parent {
                Attachment::Child(parent) => node = self.nodes.get(&parent)?,
                Attachment::Root | Attachment::Detached => return Some(origin),
            }
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        self.set_parent(child, Attachment::Child(parent));
        true
    }

    pub fn append_to_container(&mut self, child: NodeId) -> bool {
        if !self.nodes.contains_key(&child) {
            log::debug!("append_to_container: unknown instance #{child}");
            return false;
        }
        self.detach(child);
        self.roots.push(child);
        self.set_parent(child, Attachment::Root);
        true
    }

    /// Splices `child` right before `before`. If `before` is not currently a
    /// child of `parent` nothing happens, and `child` keeps its old attachment.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) -> bool {
        if child == before || !self.children(parent).contains(&before) {
            log::debug!("insert_before: #{before} is not a child of #{parent}; ignored");
            return false;
        }
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            splice_before(&mut node.children, child, before);
        }
        self.set_parent(child, Attachment::Child(parent));
        true
    }

    pub fn insert_in_container_before(&mut self, child: NodeId, before: NodeId) -> bool {
        if child == before || !self.roots.contains(&before) || !self.nodes.contains_key(&child) {
            log::debug!("insert_in_container_before: #{before} is not top-level; ignored");
            return false;
        }
        self.detach(child);
        splice_before(&mut self.roots, child, before);
        self.set_parent(child, Attachment::Root);
        true
    }

    /// Detaches `child` from `parent` and drops its whole subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(index) = node.children.iter().position(|id| *id == child) else {
            log::debug!("remove_child: #{child} is not a child of #{parent}; ignored");
            return false;
        };
        node.children.remove(index);
        self.destroy_subtree(child);
        true
    }

    pub fn remove_from_container(&mut self, child: NodeId) -> bool {
        let Some(index) = self.roots.iter().position(|id| *id == child) else {
            log::debug!("remove_from_container: #{child} is not top-level; ignored");
            return false;
        };
        self.roots.remove(index);
        self.destroy_subtree(child);
        true
    }

    /// Shallow-merges `patch` into the instance's properties.
    pub fn update_properties(&mut self, id: NodeId, patch: ShapeProps) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.props.merge_from(patch);
                true
            }
            None => false,
        }
    }

    /// Drops every top-level subtree. Detached instances survive.
    pub fn clear_container(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            self.destroy_subtree(root);
        }
    }

    /// Releases an instance the engine created but will never attach.
    pub fn detach_deleted_instance(&mut self, id: NodeId) -> bool {
        if self.parent(id) != Attachment::Detached || !self.contains(id) {
            return false;
        }
        self.destroy_subtree(id);
        true
    }

    /// Visits every attached instance in document order, parents before
    /// children, with the absolute logical origin of each.
    pub fn visit_preorder(&self, mut visitor: impl FnMut(NodeId, &InstanceNode, Point)) {
        let mut stack: Vec<(NodeId, Point)> = self
            .roots
            .iter()
            .rev()
            .map(|id| (*id, Point::ZERO))
            .collect();
        while let Some((id, base)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let (x, y) = node.props.offset();
            let origin = base + Point::new(x, y);
            visitor(id, node, origin);
            stack.extend(node.children.iter().rev().map(|child| (*child, origin)));
        }
    }

    /// Attached instance ids in document order.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.visit_preorder(|id, _, _| order.push(id));
        order
    }

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            log::debug!("attach: unknown instance (parent #{parent}, child #{child}); ignored");
            return false;
        }
        let mut current = Attachment::Child(parent);
        while let Attachment::Child(ancestor) = current {
            if ancestor == child {
                log::debug!("attach: #{child} is an ancestor of #{parent}; ignored");
                return false;
            }
            current = self.parent(ancestor);
        }
        true
    }

    fn detach(&mut self, child: NodeId) {
        match self.parent(child) {
            Attachment::Detached => {}
            Attachment::Root => self.roots.retain(|id| *id != child),
            Attachment::Child(parent) => {
                if let Some(node) = self.nodes.get_mut(&parent) {
                    node.children.retain(|id| *id != child);
                }
            }
        }
        self.set_parent(child, Attachment::Detached);
    }

    fn set_parent(&mut self, id: NodeId, parent: Attachment) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }
    }
}

fn splice_before(list: &mut ChildList, child: NodeId, before: NodeId) {
    match list.iter().position(|id| *id == before) {
        Some(index) => list.insert(index, child),
        None => list.push(child),
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
