use super::*;
use crate::viewport::Viewport;
use canvasroot_core::Attachment;
use canvasroot_render_common::{PaintStyle, RecordingSurface};
use std::cell::Cell;
use std::rc::Rc;

fn container() -> Container<RecordingSurface> {
    Container::new(
        RecordingSurface::new(0, 0),
        Viewport::new(200.0, 200.0, 1.0),
        PaintStyle::default(),
    )
}

#[test]
fn initial_reconcile_builds_tree_in_order() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(
        &mut container,
        &[
            ShapeElement::rect(10.0, 10.0, 50.0, 50.0)
                .child(ShapeElement::circle(5.0, 5.0, 2.0))
                .child(ShapeElement::label(1.0, 1.0, "a")),
            ShapeElement::rect(100.0, 0.0, 5.0, 5.0),
        ],
    );

    let roots = reconciler.root_nodes();
    assert_eq!(container.tree().roots(), roots.as_slice());
    let board = roots[0];
    let kinds: Vec<_> = container
        .tree()
        .children(board)
        .iter()
        .filter_map(|id| container.tree().get(*id).map(|node| node.kind()))
        .collect();
    assert_eq!(kinds, vec![ShapeKind::Circle, ShapeKind::Label]);
}

#[test]
fn matching_elements_update_in_place() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(&mut container, &[ShapeElement::rect(0.0, 0.0, 5.0, 5.0).color("blue")]);
    let node = reconciler.root_nodes()[0];

    reconciler.reconcile(&mut container, &[ShapeElement::rect(3.0, 0.0, 5.0, 5.0).color("red")]);
    assert_eq!(reconciler.root_nodes(), vec![node]);
    let props = &container.tree().get(node).expect("still mounted").props;
    assert_eq!(props.x, Some(3.0));
    assert_eq!(props.color.as_deref(), Some("red"));
}

#[test]
fn dropped_fields_survive_the_shallow_merge() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(&mut container, &[ShapeElement::rect(0.0, 0.0, 5.0, 5.0).color("blue")]);
    reconciler.reconcile(&mut container, &[ShapeElement::rect(0.0, 0.0, 5.0, 5.0)]);
    let node = reconciler.root_nodes()[0];
    assert_eq!(
        container.tree().get(node).and_then(|n| n.props.color.clone()),
        Some("blue".to_string())
    );
}

#[test]
fn kind_or_key_change_replaces_the_subtree_in_place() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(
        &mut container,
        &[
            ShapeElement::rect(0.0, 0.0, 5.0, 5.0).child(ShapeElement::circle(1.0, 1.0, 1.0)),
            ShapeElement::rect(10.0, 0.0, 5.0, 5.0).key("b"),
            ShapeElement::label(0.0, 20.0, "tail"),
        ],
    );
    let before = reconciler.root_nodes();
    let old_child = container.tree().children(before[0])[0];

    reconciler.reconcile(
        &mut container,
        &[
            ShapeElement::circle(0.0, 0.0, 3.0),
            ShapeElement::rect(10.0, 0.0, 5.0, 5.0).key("c"),
            ShapeElement::label(0.0, 20.0, "tail"),
        ],
    );
    let after = reconciler.root_nodes();
    assert_ne!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2], before[2]);
    assert_eq!(container.tree().roots(), after.as_slice());
    assert!(!container.tree().contains(before[0]));
    assert!(!container.tree().contains(old_child));
}

#[test]
fn extra_elements_append_and_leftovers_are_removed() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    let parent = ShapeElement::rect(0.0, 0.0, 50.0, 50.0);
    reconciler.reconcile(
        &mut container,
        &[parent.clone().child(ShapeElement::circle(1.0, 1.0, 1.0))],
    );
    let root = reconciler.root_nodes()[0];

    reconciler.reconcile(
        &mut container,
        &[parent
            .clone()
            .child(ShapeElement::circle(1.0, 1.0, 1.0))
            .child(ShapeElement::circle(2.0, 2.0, 1.0))],
    );
    assert_eq!(container.tree().children(root).len(), 2);
    let appended = container.tree().children(root)[1];
    assert_eq!(container.tree().parent(appended), Attachment::Child(root));

    reconciler.reconcile(&mut container, &[parent]);
    assert!(container.tree().children(root).is_empty());

    reconciler.reconcile(&mut container, &[]);
    assert!(container.tree().roots().is_empty());
    assert!(container.tree().is_empty());
}

#[test]
fn handlers_swap_without_new_tokens() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let counter = Rc::clone(&first);
    reconciler.reconcile(
        &mut container,
        &[ShapeElement::rect(0.0, 0.0, 10.0, 10.0).on_click(move |_| counter.set(counter.get() + 1))],
    );
    let node = reconciler.root_nodes()[0];
    let token = container.tree().get(node).and_then(|n| n.props.on_click);
    assert!(token.is_some());

    let counter = Rc::clone(&second);
    reconciler.reconcile(
        &mut container,
        &[ShapeElement::rect(0.0, 0.0, 10.0, 10.0).on_click(move |_| counter.set(counter.get() + 1))],
    );
    assert_eq!(container.tree().get(node).and_then(|n| n.props.on_click), token);
    assert_eq!(container.clicks().len(), 1);

    container.dispatch_click(canvasroot_graphics::Point::new(5.0, 5.0));
    assert_eq!((first.get(), second.get()), (0, 1));

    reconciler.reconcile(&mut container, &[ShapeElement::rect(0.0, 0.0, 10.0, 10.0)]);
    container.dispatch_click(canvasroot_graphics::Point::new(5.0, 5.0));
    assert_eq!(second.get(), 1, "dropped handler is inert");
}

#[test]
fn removed_elements_release_their_tokens() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(
        &mut container,
        &[ShapeElement::rect(0.0, 0.0, 10.0, 10.0)
            .on_click(|_| {})
            .child(ShapeElement::circle(1.0, 1.0, 1.0).on_click(|_| {}))],
    );
    assert_eq!(container.clicks().len(), 2);

    reconciler.reconcile(&mut container, &[]);
    assert!(container.clicks().is_empty());
}

#[test]
fn every_reconcile_ends_with_a_commit() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(&mut container, &[]);
    assert_eq!(container.repaint_count(), 1);

    reconciler.reconcile(&mut container, &[ShapeElement::rect(0.0, 0.0, 1.0, 1.0)]);
    assert_eq!(container.repaint_count(), 3, "append to container plus commit");
}

#[test]
fn externally_removed_slot_is_rebuilt_and_attached() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    reconciler.reconcile(
        &mut container,
        &[ShapeElement::rect(0.0, 0.0, 10.0, 10.0).on_click(|_| {})],
    );
    let rect = reconciler.root_nodes()[0];
    container.remove_from_container(rect);
    assert!(!container.tree().contains(rect));

    reconciler.reconcile(&mut container, &[ShapeElement::circle(20.0, 20.0, 5.0)]);
    let circle = reconciler.root_nodes()[0];
    assert_eq!(container.tree().roots(), &[circle]);
    assert_eq!(container.tree().len(), 1);
    assert!(container.clicks().is_empty(), "removed rect's token released");
}

#[test]
fn externally_removed_child_is_rebuilt_under_its_parent() {
    let mut container = container();
    let mut reconciler = ElementReconciler::new();
    let scene = [ShapeElement::rect(0.0, 0.0, 50.0, 50.0)
        .child(ShapeElement::circle(5.0, 5.0, 2.0))
        .child(ShapeElement::label(1.0, 1.0, "kept"))];
    reconciler.reconcile(&mut container, &scene);
    let parent = reconciler.root_nodes()[0];
    let circle = container.tree().children(parent)[0];
    container.remove_child(parent, circle);

    reconciler.reconcile(&mut container, &scene);
    let children = container.tree().children(parent);
    assert_eq!(children.len(), 2);
    assert!(!children.contains(&circle));
    let kinds: Vec<_> = children
        .iter()
        .filter_map(|id| container.tree().get(*id).map(|node| node.kind()))
        .collect();
    assert_eq!(kinds, vec![ShapeKind::Circle, ShapeKind::Label]);
}
