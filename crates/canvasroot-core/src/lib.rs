//! Retained shape tree and the mutation contract an external diffing engine
//! drives it through.

mod click;
mod debug;
mod error;
mod host;
mod shape;
mod tree;

pub use click::{ClickEvent, ClickHandler, ClickRegistry, ClickToken, PendingClick};
pub use debug::{format_instance_tree, log_instance_tree};
pub use error::NodeError;
pub use host::{apply_commands, HostConfig, MutationCommand, NodeRef};
pub use shape::{ShapeKind, ShapeProps};
pub use tree::{Attachment, ChildList, InstanceNode, InstanceTree};

pub use canvasroot_graphics::{Point, Rect, Size};

/// Identity of an instance. Allocated monotonically and never reused.
pub type NodeId = usize;
