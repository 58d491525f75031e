//! Minimal 2D geometry for surface-relative pointer positions.

use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding rectangle. Client space unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate a client-space point into this rectangle's local space.
    pub fn relative(&self, client: Point) -> Point {
        Point::new(client.x - self.x, client.y - self.y)
    }

    pub fn translated(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Re-express page-space bounds in the client space of a pointer event seen
    /// at `page` and `client`. The two differ by the current scroll offset.
    pub fn page_to_client(&self, page: Point, client: Point) -> Rect {
        self.translated(client - page)
    }
}
