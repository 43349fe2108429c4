//! The mutation contract consumed by an external diffing engine.
//!
//! Every structural operation is infallible: races such as inserting before a
//! sibling that no longer exists are absorbed as no-ops. Only requests that
//! the canvas host can never honour return [`NodeError`].

use crate::shape::{ShapeKind, ShapeProps};
use crate::{NodeError, NodeId};

/// Host side of a retained-tree reconciler.
pub trait HostConfig {
    fn create_instance(&mut self, kind: ShapeKind, props: ShapeProps) -> NodeId;

    /// Resolves an engine type tag such as `canvasRect` before creating the instance.
    fn create_instance_from_tag(
        &mut self,
        type_tag: &str,
        props: ShapeProps,
    ) -> Result<NodeId, NodeError> {
        let kind = ShapeKind::from_type_tag(type_tag)?;
        Ok(self.create_instance(kind, props))
    }

    /// Raw text only exists inside labels.
    fn create_text_instance(&mut self, _text: &str) -> Result<NodeId, NodeError> {
        Err(NodeError::Unsupported {
            operation: "raw text instances",
        })
    }

    fn commit_text_update(&mut self, _node: NodeId, _text: &str) -> Result<(), NodeError> {
        Err(NodeError::Unsupported {
            operation: "raw text updates",
        })
    }

    fn should_set_text_content(&self, _kind: ShapeKind, _props: &ShapeProps) -> bool {
        false
    }

    fn append_initial_child(&mut self, parent: NodeId, child: NodeId) {
        self.append_child(parent, child);
    }

    fn finalize_initial_children(&mut self, _node: NodeId, _props: &ShapeProps) -> bool {
        false
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId);

    fn append_to_container(&mut self, child: NodeId);

    fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId);

    fn insert_in_container_before(&mut self, child: NodeId, before: NodeId);

    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    fn remove_from_container(&mut self, child: NodeId);

    /// Computes the payload later handed to [`HostConfig::commit_update`].
    /// `None` means nothing needs to change.
    fn prepare_update(&self, old: &ShapeProps, new: &ShapeProps) -> Option<ShapeProps> {
        (old != new).then(|| new.clone())
    }

    fn commit_update(&mut self, node: NodeId, payload: ShapeProps);

    fn clear_container(&mut self);

    fn detach_deleted_instance(&mut self, _node: NodeId) {}

    fn prepare_for_commit(&mut self) {}

    /// End of a mutation batch.
    fn reset_after_commit(&mut self);
}

/// Addresses an instance inside a command batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Existing(NodeId),
    /// The n-th instance created by earlier commands of the same batch.
    Created(usize),
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        NodeRef::Existing(id)
    }
}

/// One host operation as plain data.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationCommand {
    CreateInstance { type_tag: String, props: ShapeProps },
    CreateTextInstance { text: String },
    AppendInitialChild { parent: NodeRef, child: NodeRef },
    AppendChild { parent: NodeRef, child: NodeRef },
    AppendToContainer { child: NodeRef },
    InsertBefore { parent: NodeRef, child: NodeRef, before: NodeRef },
    InsertInContainerBefore { child: NodeRef, before: NodeRef },
    RemoveChild { parent: NodeRef, child: NodeRef },
    RemoveFromContainer { child: NodeRef },
    CommitUpdate { node: NodeRef, props: ShapeProps },
    CommitTextUpdate { node: NodeRef, text: String },
    ClearContainer,
    DetachDeletedInstance { node: NodeRef },
    Commit,
}

/// Applies `commands` in order and returns the ids created along the way.
///
/// Commands that reference an unknown `Created` slot are skipped. The first
/// contract violation aborts the batch; earlier commands stay applied.
pub fn apply_commands<H>(
    host: &mut H,
    commands: impl IntoIterator<Item = MutationCommand>,
) -> Result<Vec<NodeId>, NodeError>
where
    H: HostConfig + ?Sized,
{
    let mut created = Vec::new();
    host.prepare_for_commit();
    for command in commands {
        apply_command(host, command, &mut created)?;
    }
    Ok(created)
}

fn apply_command<H>(
    host: &mut H,
    command: MutationCommand,
    created: &mut Vec<NodeId>,
) -> Result<(), NodeError>
where
    H: HostConfig + ?Sized,
{
    match command {
        MutationCommand::CreateInstance { type_tag, props } => {
            created.push(host.create_instance_from_tag(&type_tag, props)?);
        }
        MutationCommand::CreateTextInstance { text } => {
            created.push(host.create_text_instance(&text)?);
        }
        MutationCommand::AppendInitialChild { parent, child } => {
            if let (Some(parent), Some(child)) = (resolve(parent, created), resolve(child, created)) {
                host.append_initial_child(parent, child);
            }
        }
        MutationCommand::AppendChild { parent, child } => {
            if let (Some(parent), Some(child)) = (resolve(parent, created), resolve(child, created)) {
                host.append_child(parent, child);
            }
        }
        MutationCommand::AppendToContainer { child } => {
            if let Some(child) = resolve(child, created) {
                host.append_to_container(child);
            }
        }
        MutationCommand::InsertBefore {
            parent,
            child,
            before,
        } => {
            if let (Some(parent), Some(child), Some(before)) = (
                resolve(parent, created),
                resolve(child, created),
                resolve(before, created),
            ) {
                host.insert_before(parent, child, before);
            }
        }
        MutationCommand::InsertInContainerBefore { child, before } => {
            if let (Some(child), Some(before)) = (resolve(child, created), resolve(before, created)) {
                host.insert_in_container_before(child, before);
            }
        }
        MutationCommand::RemoveChild { parent, child } => {
            if let (Some(parent), Some(child)) = (resolve(parent, created), resolve(child, created)) {
                host.remove_child(parent, child);
            }
        }
        MutationCommand::RemoveFromContainer { child } => {
            if let Some(child) = resolve(child, created) {
                host.remove_from_container(child);
            }
        }
        MutationCommand::CommitUpdate { node, props } => {
            if let Some(node) = resolve(node, created) {
                host.commit_update(node, props);
            }
        }
        MutationCommand::CommitTextUpdate { node, text } => {
            if let Some(node) = resolve(node, created) {
                host.commit_text_update(node, &text)?;
            }
        }
        MutationCommand::ClearContainer => host.clear_container(),
        MutationCommand::DetachDeletedInstance { node } => {
            if let Some(node) = resolve(node, created) {
                host.detach_deleted_instance(node);
            }
        }
        MutationCommand::Commit => host.reset_after_commit(),
    }
    Ok(())
}

fn resolve(node: NodeRef, created: &[NodeId]) -> Option<NodeId> {
    match node {
        NodeRef::Existing(id) => Some(id),
        NodeRef::Created(slot) => {
            let id = created.get(slot).copied();
            if id.is_none() {
                log::debug!("mutation references unknown created slot {slot}; skipped");
            }
            id
        }
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
