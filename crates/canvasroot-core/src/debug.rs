//! Debug utilities for inspecting the instance tree.
//!
//! ```rust,ignore
//! use canvasroot_core::{format_instance_tree, log_instance_tree};
//!
//! log_instance_tree(container.tree());
//! ```

use crate::shape::ShapeProps;
use crate::tree::InstanceTree;
use crate::NodeId;
use std::fmt::Write;

/// Formats the attached tree, one instance per line, indented by depth.
pub fn format_instance_tree(tree: &InstanceTree) -> String {
    let mut output = String::new();
    for root in tree.roots() {
        format_node(tree, *root, 0, &mut output);
    }
    output
}

/// Logs [`format_instance_tree`] at debug level.
pub fn log_instance_tree(tree: &InstanceTree) {
    log::debug!(
        "instance tree ({} live):\n{}",
        tree.len(),
        format_instance_tree(tree)
    );
}

fn format_node(tree: &InstanceTree, id: NodeId, depth: usize, output: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let (x, y) = node.props.offset();
    let _ = write!(output, "{indent}[#{id}] {} at ({x:.1}, {y:.1})", node.kind());
    describe_props(&node.props, output);
    output.push('\n');
    for child in node.children() {
        format_node(tree, *child, depth + 1, output);
    }
}

fn describe_props(props: &ShapeProps, output: &mut String) {
    if let (Some(width), Some(height)) = (props.width, props.height) {
        let _ = write!(output, " size: ({width:.1}x{height:.1})");
    }
    if let Some(radius) = props.radius {
        let _ = write!(output, " r: {radius:.1}");
    }
    if let Some(text) = &props.text {
        let _ = write!(output, " text: {text:?}");
    }
    if let Some(color) = &props.color {
        let _ = write!(output, " color: {color}");
    }
    if let Some(id) = &props.id {
        let _ = write!(output, " id: {id}");
    }
    if props.on_click.is_some() {
        output.push_str(" [clickable]");
    }
}
