use super::*;
use canvasroot_core::{apply_commands, MutationCommand, NodeRef};
use canvasroot_graphics::Rect;
use canvasroot_render_common::{DrawCommand, RecordingSurface};
use std::cell::RefCell;
use std::rc::Rc;

fn container(ratio: f32) -> Container<RecordingSurface> {
    let mut container = Container::new(
        RecordingSurface::new(0, 0),
        Viewport::new(100.0, 100.0, ratio),
        PaintStyle::default(),
    );
    container.surface_mut().take_commands();
    container
}

#[test]
fn new_container_sizes_surface_to_physical_buffer() {
    let container = Container::new(
        RecordingSurface::new(0, 0),
        Viewport::new(100.0, 50.0, 2.0),
        PaintStyle::default(),
    );
    assert_eq!(container.surface().size(), (200, 100));
    assert_eq!(
        container.surface().commands(),
        &[
            DrawCommand::Resize {
                width: 200,
                height: 100
            },
            DrawCommand::ResetTransform
        ]
    );
}

#[test]
fn top_level_mutations_repaint_nested_ones_wait_for_commit() {
    let mut container = container(1.0);
    let parent = container.create_instance(ShapeKind::Rect, ShapeProps::rect(0.0, 0.0, 10.0, 10.0));
    let child = container.create_instance(ShapeKind::Circle, ShapeProps::circle(1.0, 1.0, 1.0));

    container.append_to_container(parent);
    assert_eq!(container.repaint_count(), 1);

    container.append_child(parent, child);
    container.commit_update(child, ShapeProps::new().color("red"));
    container.remove_child(parent, child);
    assert_eq!(container.repaint_count(), 1);

    container.reset_after_commit();
    assert_eq!(container.repaint_count(), 2);

    container.remove_from_container(parent);
    assert_eq!(container.repaint_count(), 3);
}

#[test]
fn ignored_top_level_mutations_do_not_repaint() {
    let mut container = container(1.0);
    let a = container.create_instance(ShapeKind::Rect, ShapeProps::new());
    let b = container.create_instance(ShapeKind::Rect, ShapeProps::new());

    container.insert_in_container_before(a, b);
    container.remove_from_container(a);
    assert_eq!(container.repaint_count(), 0);
    assert!(container.tree().roots().is_empty());
}

#[test]
fn insert_in_container_before_repaints_in_new_order() {
    let mut container = container(1.0);
    let back = container.create_instance(ShapeKind::Rect, ShapeProps::rect(0.0, 0.0, 1.0, 1.0).color("red"));
    let front = container.create_instance(ShapeKind::Rect, ShapeProps::rect(0.0, 0.0, 1.0, 1.0).color("blue"));
    container.append_to_container(back);
    container.insert_in_container_before(front, back);

    let colors: Vec<_> = container
        .surface()
        .frame_draws()
        .into_iter()
        .filter_map(|command| match command {
            DrawCommand::FillRect { color, .. } => Some(color.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec!["blue".to_string(), "red".to_string()]);
}

#[test]
fn clear_container_wipes_surface_immediately() {
    let mut container = container(1.0);
    let id = container.create_instance(ShapeKind::Rect, ShapeProps::rect(0.0, 0.0, 5.0, 5.0));
    container.append_to_container(id);
    container.surface_mut().take_commands();

    container.clear_container();
    assert!(container.tree().roots().is_empty());
    assert_eq!(container.surface().commands(), &[DrawCommand::Clear]);
}

#[test]
fn resize_repaints_at_new_ratio() {
    let mut container = container(1.0);
    let id = container.create_instance(ShapeKind::Rect, ShapeProps::rect(10.0, 10.0, 5.0, 5.0));
    container.append_to_container(id);
    container.surface_mut().take_commands();

    assert!(container.resize(Size::new(100.0, 100.0), 2.0));
    assert_eq!(
        container.surface().commands(),
        &[
            DrawCommand::Resize {
                width: 200,
                height: 200
            },
            DrawCommand::ResetTransform,
            DrawCommand::Clear,
            DrawCommand::FillRect {
                rect: Rect::new(20.0, 20.0, 10.0, 10.0),
                color: "black".into()
            },
        ]
    );
}

#[test]
fn dispatch_click_passes_id_and_logical_point() {
    let mut container = container(2.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let token = container
        .clicks_mut()
        .register(move |event: &ClickEvent| sink.borrow_mut().push(event.clone()));

    let created = apply_commands(
        &mut container,
        vec![
            MutationCommand::CreateInstance {
                type_tag: "canvasCircle".into(),
                props: ShapeProps::circle(30.0, 30.0, 10.0).id("coin").on_click(token),
            },
            MutationCommand::AppendToContainer {
                child: NodeRef::Created(0),
            },
            MutationCommand::Commit,
        ],
    )
    .expect("batch applies");

    assert_eq!(container.dispatch_click(Point::new(35.0, 30.0)), Some(created[0]));
    assert_eq!(container.dispatch_click(Point::new(0.0, 0.0)), None);
    assert_eq!(
        seen.borrow().as_slice(),
        &[ClickEvent {
            node: created[0],
            id: Some("coin".into()),
            point: Point::new(35.0, 30.0),
        }]
    );
}

#[test]
fn click_indicator_is_drawn_in_physical_space() {
    let mut container = container(2.0);
    container.draw_click_indicator(Point::new(10.0, 20.0), &ClickIndicator::default());
    assert_eq!(
        container.surface().commands(),
        &[DrawCommand::FillCircle {
            center: Point::new(20.0, 40.0),
            radius: 10.0,
            color: "rgba(255, 0, 0, 0.5)".into(),
        }]
    );
}
