//! Rectangles in output-surface units.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle every renderer draws into.
///
/// Units are SVG user units (CSS pixels at 96 DPI). Cells are created by the
/// layout engine and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Cell {
    /// Creates a new cell.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The shorter side.
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Point at the given percentages of width and height.
    #[must_use]
    pub fn point_at_percent(&self, x_percent: f64, y_percent: f64) -> (f64, f64) {
        (
            self.x + self.width * x_percent.clamp(0.0, 100.0) / 100.0,
            self.y + self.height * y_percent.clamp(0.0, 100.0) / 100.0,
        )
    }

    /// Whether `other` lies entirely inside this rectangle (with a small tolerance).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let cell = Cell::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(cell.right(), 40.0);
        assert_eq!(cell.bottom(), 60.0);
        assert_eq!(cell.center(), (25.0, 40.0));
        assert_eq!(cell.min_side(), 30.0);
    }

    #[test]
    fn test_point_at_percent_clamps() {
        let cell = Cell::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(cell.point_at_percent(25.0, 50.0), (25.0, 25.0));
        assert_eq!(cell.point_at_percent(150.0, -10.0), (100.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let outer = Cell::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Cell::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains(&Cell::new(90.0, 10.0, 20.0, 20.0)));
    }
}
