//! The sample point value type shared by every storage engine.

use std::fmt;

/// Tolerance used for x/y coordinate comparisons throughout the crate.
///
/// Two coordinates closer than this are treated as colliding wherever a new
/// x-coordinate enters a function, and as equal wherever two functions are
/// compared structurally.
pub const EPSILON: f64 = 1e-9;

/// A single `(x, y)` sample of a tabulated function.
///
/// Points have no ordering invariant of their own; ordering is a property of
/// the containing function. A `Point` is always copied when it crosses the
/// container boundary, so callers can never alias a container's internal
/// storage.
///
/// # Examples
///
/// ```rust
/// use tabfn::Point;
///
/// let point = Point::new(1.0, 2.5);
/// assert_eq!(point.x, 1.0);
/// assert_eq!(format!("{point}"), "(1 ; 2.5)");
///
/// let from_pair: Point = (0.5, -1.0).into();
/// assert_eq!(from_pair.y, -1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// The sample's x-coordinate (abscissa).
    pub x: f64,
    /// The sample's y-coordinate (ordinate).
    pub y: f64,
}

impl Point {
    /// Creates a new point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Compares two points coordinate-wise within [`EPSILON`].
    ///
    /// # Returns
    /// True when both coordinates differ by less than the tolerance.
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<(f64, f64)> for Point {
    /// Converts an `(x, y)` tuple into a point.
    fn from(coordinates: (f64, f64)) -> Self {
        Point {
            x: coordinates.0,
            y: coordinates.1,
        }
    }
}

impl fmt::Display for Point {
    /// Formats the point as `(x ; y)`, the tuple form used by
    /// [`render`](crate::TabulatedFunction::render).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} ; {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = Point::new(1.5, -2.0);
        assert_eq!(point.x, 1.5);
        assert_eq!(point.y, -2.0);
    }

    #[test]
    fn test_point_from_tuple() {
        let point: Point = (3.0, 4.0).into();
        assert_eq!(point, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_approx_eq_within_tolerance() {
        let first = Point::new(1.0, 2.0);
        let second = Point::new(1.0 + EPSILON / 2.0, 2.0 - EPSILON / 2.0);
        assert!(first.approx_eq(&second));
    }

    #[test]
    fn test_approx_eq_outside_tolerance() {
        let first = Point::new(1.0, 2.0);
        assert!(!first.approx_eq(&Point::new(1.0 + 2.0 * EPSILON, 2.0)));
        assert!(!first.approx_eq(&Point::new(1.0, 2.5)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format!("{}", Point::new(0.0, 0.0)), "(0 ; 0)");
        assert_eq!(format!("{}", Point::new(1.5, -0.25)), "(1.5 ; -0.25)");
    }
}
