//! Geometric primitives for level scheme layout and rendering.
//!
//! - [`Point`] - A 2D coordinate
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate Systems
//!
//! Two coordinate systems meet in this crate. Layout works in *data space*:
//! x is a relative horizontal position (`0.0` is the left edge of the level
//! bars, `1.0` the right edge) and y is an energy, growing upward.
//! Rendering maps data space into SVG space, whose origin is the top-left
//! corner with y growing downward.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use lsd_core::geometry::Point;
/// let point = Point::new(0.5, 1332.5);
///
/// assert_eq!(point.x(), 0.5);
/// assert!(point.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from two opposite corners, in any order.
    pub fn new_from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates the smallest bounds containing every point, or `None` for an
    /// empty iterator.
    ///
    /// ```
    /// # use lsd_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([Point::new(0.0, 5.0), Point::new(2.0, -1.0)]).unwrap();
    /// assert_eq!(bounds.width(), 2.0);
    /// assert_eq!(bounds.height(), 6.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new_from_corners(first, first), |acc, point| {
            acc.include(point)
        }))
    }

    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns bounds grown just enough to contain `point`
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Returns bounds expanded outward by the given insets
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.bottom,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.top,
        }
    }
}

/// Padding or margin on four sides.
///
/// In data space `top` pads the high-energy side and `bottom` the low-energy
/// side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    /// Sum of left and right
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_bounds_from_corners_any_order() {
        let bounds = Bounds::new_from_corners(Point::new(4.0, 1.0), Point::new(-2.0, 3.0));

        assert_approx_eq!(f32, bounds.min_x(), -2.0);
        assert_approx_eq!(f32, bounds.max_x(), 4.0);
        assert_approx_eq!(f32, bounds.min_y(), 1.0);
        assert_approx_eq!(f32, bounds.max_y(), 3.0);
    }

    #[test]
    fn test_bounds_from_points_empty() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_include_and_padding() {
        let a = Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(1.0, 1.0));

        let merged = a
            .include(Point::new(0.5, -2.0))
            .include(Point::new(3.0, 0.5))
            .add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));

        assert_approx_eq!(f32, merged.min_x(), -4.0);
        assert_approx_eq!(f32, merged.max_x(), 5.0);
        assert_approx_eq!(f32, merged.min_y(), -5.0);
        assert_approx_eq!(f32, merged.max_y(), 2.0);
        assert_approx_eq!(f32, merged.width(), 9.0);
        assert_approx_eq!(f32, merged.height(), 7.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_approx_eq!(f32, insets.horizontal_sum(), 6.0);
        assert_approx_eq!(f32, insets.vertical_sum(), 4.0);
    }

    #[test]
    fn test_point_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }
}
