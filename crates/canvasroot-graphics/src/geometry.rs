use std::fmt;
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Scales origin and extent together, as a device-pixel-ratio change does.
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect {{ x: {:.1}, y: {:.1}, width: {:.1}, height: {:.1} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_inclusive() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 20.0)), "top-left corner");
        assert!(rect.contains(Point::new(110.0, 70.0)), "bottom-right corner");
        assert!(rect.contains(Point::new(50.0, 30.0)), "center");
        assert!(!rect.contains(Point::new(110.1, 70.0)));
        assert!(!rect.contains(Point::new(9.9, 20.0)));
    }

    #[test]
    fn rect_scale_moves_origin_and_extent() {
        let rect = Rect::new(10.0, 10.0, 50.0, 50.0).scale(2.0);
        assert_eq!(rect, Rect::new(20.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn point_arithmetic() {
        let sum = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
        assert_eq!(sum, Point::new(4.0, 6.0));
        assert_eq!(sum - Point::new(4.0, 6.0), Point::ZERO);
        assert_eq!(Point::new(0.0, 0.0).distance_squared(Point::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn rect_display_is_compact() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            rect.to_string(),
            "Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 }"
        );
    }
}
