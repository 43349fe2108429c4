use super::*;
use crate::assertions::{
    assert_contains_text, assert_count, assert_filled_rect, assert_not_contains_text,
    assert_point_approx_eq, assert_rect_approx_eq,
};
use canvasroot_graphics::Rect;
use std::cell::Cell;
use std::rc::Rc;

fn counter_scene(count: &Rc<Cell<i32>>) -> Vec<ShapeElement> {
    let on_click = Rc::clone(count);
    vec![
        ShapeElement::label(10.0, 20.0, format!("Count: {}", count.get())),
        ShapeElement::rect(10.0, 40.0, 60.0, 30.0)
            .color("steelblue")
            .on_click(move |_| on_click.set(on_click.get() + 1))
            .child(ShapeElement::label(10.0, 20.0, "Tap").color("white")),
    ]
}

#[test]
fn rule_can_click_and_read_scene() {
    let count = Rc::new(Cell::new(0));
    let mut rule = CanvasTestRule::launch(&counter_scene(&count)).expect("mounts");
    assert_contains_text(&rule.texts(), "Count: 0", "initial label");

    let button = rule.root().root_nodes()[1];
    assert_eq!(rule.click(30.0, 50.0), Some(button));
    assert_eq!(count.get(), 1);

    rule.update(&counter_scene(&count));
    let texts = rule.texts();
    assert_contains_text(&texts, "Count: 1", "updated label");
    assert_not_contains_text(&texts, "Count: 0", "stale label");
    assert_eq!(rule.root().root_nodes()[1], button, "button kept its instance");
}

#[test]
fn clicking_the_nested_label_targets_the_label() {
    let count = Rc::new(Cell::new(0));
    let mut rule = CanvasTestRule::launch(&counter_scene(&count)).expect("mounts");
    let button = rule.root().root_nodes()[1];
    let label = rule.root().container().tree().children(button)[0];

    // Label anchor sits at (20, 60); its box wins over the rect beneath it.
    assert_eq!(rule.click(22.0, 58.0), Some(label));
    assert_eq!(count.get(), 0, "labels carry no handler here");
}

#[test]
fn indicator_lingers_until_the_clock_advances() {
    let mut rule = CanvasTestRule::launch(&[ShapeElement::rect(0.0, 0.0, 10.0, 10.0)]).expect("mounts");
    rule.click(100.0, 100.0);
    assert!(matches!(
        rule.frame().last(),
        Some(DrawCommand::FillCircle { .. })
    ));

    assert_eq!(rule.advance(Duration::from_millis(999)), 0);
    assert_eq!(rule.advance(Duration::from_millis(1)), 1);
    assert_count(&rule.draws(), 1, "indicator cleared");
    assert_filled_rect(rule.frame(), Rect::new(0.0, 0.0, 10.0, 10.0), "black", "rect repainted");
}

#[test]
fn geometry_reports_absolute_logical_placement() {
    let rule = CanvasTestRule::launch_with(
        &[ShapeElement::rect(10.0, 10.0, 50.0, 40.0)
            .child(ShapeElement::circle(5.0, 5.0, 3.0))],
        CanvasSettings::default().with_device_pixel_ratio(2.0),
    )
    .expect("mounts");
    let rect = rule.root().root_nodes()[0];
    let circle = rule.root().container().tree().children(rect)[0];

    match rule.geometry(rect) {
        Some(ShapeGeometry::Rect(bounds)) => {
            assert_rect_approx_eq(bounds, Rect::new(10.0, 10.0, 50.0, 40.0), 1e-4, "rect")
        }
        other => panic!("unexpected geometry {other:?}"),
    }
    match rule.geometry(circle) {
        Some(ShapeGeometry::Circle { center, radius }) => {
            assert_point_approx_eq(center, Point::new(15.0, 15.0), 1e-4, "circle centre");
            assert_eq!(radius, 3.0);
        }
        other => panic!("unexpected geometry {other:?}"),
    }
    assert_eq!(rule.node_at(15.0, 15.0), Some(circle));
}

#[test]
fn dump_lists_every_instance() {
    let rule = CanvasTestRule::launch_with(
        &[ShapeElement::rect(0.0, 0.0, 5.0, 5.0).child(ShapeElement::label(1.0, 1.0, "hi"))],
        CanvasSettings::default(),
    )
    .expect("mounts");
    let dump = rule.dump_tree();
    assert_eq!(dump.lines().count(), 2);
    assert!(dump.lines().nth(1).is_some_and(|line| line.starts_with("  [#")));
}
