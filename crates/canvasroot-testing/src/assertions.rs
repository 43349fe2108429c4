//! Assertion helpers for canvas tests.
//!
//! Painted geometry goes through float scaling, so positions and sizes are
//! compared with a tolerance rather than exactly.

use canvasroot_graphics::{Point, Rect};
use canvasroot_render_common::DrawCommand;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{msg}: expected {expected} (±{tolerance}), got {actual} (diff: {diff})"
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{msg} - y"));
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{msg} - y"));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{msg} - width"),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{msg} - height"),
    );
}

/// Assert that a rectangle contains a point, edges included.
pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(
        rect.contains(Point::new(x, y)),
        "{msg}: point ({x}, {y}) not in rect {rect:?}"
    );
}

/// Assert that a list contains a specific text fragment.
pub fn assert_contains_text(texts: &[String], fragment: &str, msg: &str) {
    assert!(
        texts.iter().any(|t| t.contains(fragment)),
        "{msg}: text '{fragment}' not found in {texts:?}"
    );
}

pub fn assert_not_contains_text(texts: &[String], fragment: &str, msg: &str) {
    assert!(
        !texts.iter().any(|t| t.contains(fragment)),
        "{msg}: text '{fragment}' unexpectedly found in {texts:?}"
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{msg}: expected {expected} items, got {}",
        items.len()
    );
}

/// Assert that a frame filled a rect of `color` approximately covering `expected`.
pub fn assert_filled_rect(frame: &[DrawCommand], expected: Rect, color: &str, msg: &str) {
    let found = frame.iter().any(|command| match command {
        DrawCommand::FillRect { rect, color: fill } => {
            fill == color
                && (rect.x - expected.x).abs() <= 1e-3
                && (rect.y - expected.y).abs() <= 1e-3
                && (rect.width - expected.width).abs() <= 1e-3
                && (rect.height - expected.height).abs() <= 1e-3
        }
        _ => false,
    });
    assert!(found, "{msg}: no {color} fill at {expected:?} in {frame:?}");
}
