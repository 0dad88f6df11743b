//! Core geometry types: Axis, Point, Rect.
//!
//! Scroll geometry is measured in host units (CSS pixels in a browser, cells in
//! a terminal). Values are `f64` because native scroll metrics are fractional
//! and the thumb position is derived by division.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// A scroll dimension. Each axis carries independent scrollbar state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Both axes, vertical first (the order reflows run in).
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// The coordinate of `point` along this axis.
    #[inline]
    pub const fn coordinate(self, point: Point) -> f64 {
        match self {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Vertical => write!(f, "vertical"),
            Axis::Horizontal => write!(f, "horizontal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A pointer position or 2D displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A bounding box defined by position and size, as returned by a host's
/// element geometry query.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// The extent along `axis` (height for vertical, width for horizontal).
    #[inline]
    pub const fn extent(self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Whether `point` lies inside this rect (right and bottom edges exclusive).
    #[inline]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Distance from `point` to the trailing edge along `axis`: the right edge
    /// for the vertical scrollbar, the bottom edge for the horizontal one.
    #[inline]
    pub fn distance_to_trailing_edge(self, axis: Axis, point: Point) -> f64 {
        match axis {
            Axis::Vertical => self.right() - point.x,
            Axis::Horizontal => self.bottom() - point.y,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_coordinate() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Axis::Vertical.coordinate(p), 7.0);
        assert_eq!(Axis::Horizontal.coordinate(p), 3.0);
    }

    #[test]
    fn axis_display() {
        assert_eq!(Axis::Vertical.to_string(), "vertical");
        assert_eq!(Axis::Horizontal.to_string(), "horizontal");
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a + b, Point::new(5.0, 8.0));
        assert_eq!(b - a, Point::new(3.0, 4.0));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.extent(Axis::Vertical), 50.0);
        assert_eq!(r.extent(Axis::Horizontal), 100.0);
    }

    #[test]
    fn rect_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.5, 9.5)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn trailing_edge_distance() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        let p = Point::new(190.0, 40.0);
        assert_eq!(r.distance_to_trailing_edge(Axis::Vertical, p), 10.0);
        assert_eq!(r.distance_to_trailing_edge(Axis::Horizontal, p), 60.0);
    }
}
