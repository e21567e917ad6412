//! Contiguous growable-array storage engine.

use crate::errors::FunctionError;
use crate::function::{
    self, Function, MIN_POINTS, TabulatedFunction, check_move, check_points, interpolate_at,
    uniform_points, valued_points,
};
use crate::point::{EPSILON, Point};

/// A tabulated function backed by one contiguous growable buffer.
///
/// The buffer's capacity may exceed the live point count and never shrinks
/// on deletion. Indexed access is O(1); inserting or deleting an interior
/// point shifts the suffix and costs O(n).
///
/// # Examples
///
/// ```rust
/// use tabfn::{ArrayTabulatedFunction, Function, Point, TabulatedFunction};
///
/// let mut function = ArrayTabulatedFunction::with_values(0.0, 2.0, &[0.0, 1.0, 4.0]).unwrap();
/// function.set_y(1, 2.0).unwrap();
/// assert_eq!(function.value_at(1.0), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ArrayTabulatedFunction {
    points: Vec<Point>,
}

impl ArrayTabulatedFunction {
    /// Creates a function from an explicit point sequence.
    ///
    /// The sequence must hold at least [`MIN_POINTS`] points with strictly
    /// increasing, tolerance-separated x-coordinates.
    pub fn from_points(points: Vec<Point>) -> Result<Self, FunctionError> {
        check_points(&points)?;
        Ok(ArrayTabulatedFunction { points })
    }

    /// Creates a zero-filled uniform grid of `count` points over
    /// `[left, right]`.
    pub fn uniform(left: f64, right: f64, count: usize) -> Result<Self, FunctionError> {
        Ok(ArrayTabulatedFunction {
            points: uniform_points(left, right, count)?,
        })
    }

    /// Creates a uniform grid over `[left, right]` with the supplied
    /// y-values, one per grid node.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<Self, FunctionError> {
        Ok(ArrayTabulatedFunction {
            points: valued_points(left, right, values)?,
        })
    }

    /// Reads a function from the canonical binary layout.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, FunctionError> {
        Self::from_points(function::binary::read_points(reader)?)
    }

    /// The buffer capacity currently held, in points. Always at least the
    /// live count.
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    fn check_index(&self, index: usize) -> Result<(), FunctionError> {
        if index >= self.points.len() {
            return Err(FunctionError::IndexOutOfRange {
                index,
                count: self.points.len(),
            });
        }
        Ok(())
    }

    /// Grows the buffer ahead of an insertion when it is full: double the
    /// capacity, or jump straight to the minimum sufficient size, in a
    /// single allocation. Growing before any element moves keeps partial
    /// states unobservable.
    fn reserve_for_insert(&mut self) {
        if self.points.len() == self.points.capacity() {
            let target = (self.points.capacity() * 2).max(self.points.len() + 1);
            self.points.reserve_exact(target - self.points.len());
        }
    }
}

impl Function for ArrayTabulatedFunction {
    fn value_at(&self, x: f64) -> f64 {
        interpolate_at(self, x)
    }

    fn left_border(&self) -> f64 {
        self.points.first().map_or(f64::NAN, |point| point.x)
    }

    fn right_border(&self) -> f64 {
        self.points.last().map_or(f64::NAN, |point| point.x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> Result<Point, FunctionError> {
        self.check_index(index)?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), FunctionError> {
        self.check_index(index)?;
        check_move(self, index, point.x)?;
        self.points[index] = point;
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        self.check_index(index)?;
        self.points[index].y = y;
        Ok(())
    }

    fn insert(&mut self, point: Point) -> Result<(), FunctionError> {
        if !point.x.is_finite() {
            return Err(FunctionError::OutOfDomainPoint {
                x: point.x,
                bound: self.right_border(),
            });
        }
        if point.x > self.right_border() {
            self.reserve_for_insert();
            self.points.push(point);
            return Ok(());
        }

        // First slot whose x is at or beyond the new point; bounded because
        // the right border is at least point.x.
        let mut index = 0;
        while self.points[index].x < point.x {
            index += 1;
        }
        if (self.points[index].x - point.x).abs() < EPSILON {
            return Err(FunctionError::DuplicateX { x: point.x });
        }
        self.reserve_for_insert();
        self.points.insert(index, point);
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<(), FunctionError> {
        self.check_index(index)?;
        if self.points.len() <= MIN_POINTS {
            return Err(FunctionError::MinimumSizeViolation { floor: MIN_POINTS });
        }
        // Dropping the tail slot needs no shift; interior removal shifts the
        // suffix left. The buffer keeps its capacity either way.
        self.points.remove(index);
        Ok(())
    }
}

impl std::fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrayTabulatedFunction {
        ArrayTabulatedFunction::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 4.0),
        ])
        .unwrap()
    }

    mod access_tests {
        use super::*;

        #[test]
        fn test_point_access_is_a_copy() {
            let function = sample();
            let mut point = function.point_at(1).unwrap();
            point.y = 100.0;
            assert_eq!(function.y_at(1).unwrap(), 1.0);
        }

        #[test]
        fn test_index_out_of_range() {
            let function = sample();
            assert!(matches!(
                function.point_at(3),
                Err(FunctionError::IndexOutOfRange { index: 3, count: 3 })
            ));
        }

        #[test]
        fn test_borders() {
            let function = sample();
            assert_eq!(function.left_border(), 0.0);
            assert_eq!(function.right_border(), 2.0);
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn test_set_y_is_unconditional() {
            let mut function = sample();
            function.set_y(0, -5.0).unwrap();
            assert_eq!(function.y_at(0).unwrap(), -5.0);
        }

        #[test]
        fn test_set_x_within_neighbours() {
            let mut function = sample();
            function.set_x(1, 1.5).unwrap();
            assert_eq!(function.x_at(1).unwrap(), 1.5);
        }

        #[test]
        fn test_set_x_rejects_crossing_a_neighbour() {
            let mut function = sample();
            let result = function.set_x(1, 2.5);
            assert!(matches!(
                result,
                Err(FunctionError::OutOfDomainPoint { bound, .. }) if bound == 2.0
            ));
            // The instance is untouched on failure.
            assert_eq!(function.x_at(1).unwrap(), 1.0);
        }

        #[test]
        fn test_set_x_rejects_neighbour_collision() {
            let mut function = sample();
            assert!(function.set_x(1, 2.0).is_err());
            assert!(function.set_x(1, 0.0).is_err());
        }

        #[test]
        fn test_set_point_replaces_both_coordinates() {
            let mut function = sample();
            function.set_point(1, Point::new(0.5, 10.0)).unwrap();
            assert_eq!(function.point_at(1).unwrap(), Point::new(0.5, 10.0));
        }

        #[test]
        fn test_border_points_keep_ordering() {
            let mut function = sample();
            // Moving the first point may not reach its right neighbour.
            assert!(function.set_x(0, 1.0).is_err());
            function.set_x(0, 0.5).unwrap();
            assert_eq!(function.left_border(), 0.5);
        }
    }

    mod insert_tests {
        use super::*;

        #[test]
        fn test_append_beyond_right_border() {
            let mut function = sample();
            function.insert(Point::new(3.0, 9.0)).unwrap();
            assert_eq!(function.point_count(), 4);
            assert_eq!(function.right_border(), 3.0);
        }

        #[test]
        fn test_interior_insert_keeps_order() {
            let mut function = sample();
            function.insert(Point::new(1.5, 9.0)).unwrap();
            let xs: Vec<f64> = (0..function.point_count())
                .map(|index| function.x_at(index).unwrap())
                .collect();
            assert_eq!(xs, vec![0.0, 1.0, 1.5, 2.0]);
        }

        #[test]
        fn test_prepend_before_left_border() {
            let mut function = sample();
            function.insert(Point::new(-1.0, 2.0)).unwrap();
            assert_eq!(function.left_border(), -1.0);
        }

        #[test]
        fn test_duplicate_x_rejected() {
            let mut function = sample();
            assert!(matches!(
                function.insert(Point::new(1.0, 5.0)),
                Err(FunctionError::DuplicateX { .. })
            ));
            assert_eq!(function.point_count(), 3);
        }

        #[test]
        fn test_non_finite_x_rejected() {
            let mut function = sample();
            assert!(function.insert(Point::new(f64::NAN, 0.0)).is_err());
            assert!(function.insert(Point::new(f64::INFINITY, 0.0)).is_err());
        }

        #[test]
        fn test_growth_preserves_contents() {
            let mut function = sample();
            let before: Vec<Point> = (0..3).map(|i| function.point_at(i).unwrap()).collect();
            for index in 0..20 {
                function.insert(Point::new(10.0 + index as f64, 1.0)).unwrap();
            }
            assert_eq!(function.point_count(), 23);
            assert!(function.capacity() >= 23);
            for (index, point) in before.iter().enumerate() {
                assert_eq!(function.point_at(index).unwrap(), *point);
            }
        }
    }

    mod delete_tests {
        use super::*;

        #[test]
        fn test_delete_interior_point() {
            let mut function = sample();
            function.delete(1).unwrap();
            assert_eq!(function.point_count(), 2);
            assert_eq!(function.x_at(1).unwrap(), 2.0);
        }

        #[test]
        fn test_delete_tail_point() {
            let mut function = sample();
            function.delete(2).unwrap();
            assert_eq!(function.right_border(), 1.0);
        }

        #[test]
        fn test_delete_at_floor_rejected() {
            let mut function = sample();
            function.delete(0).unwrap();
            assert!(matches!(
                function.delete(0),
                Err(FunctionError::MinimumSizeViolation { floor: 2 })
            ));
            assert_eq!(function.point_count(), 2);
        }

        #[test]
        fn test_capacity_kept_after_delete() {
            let mut function = sample();
            let capacity = function.capacity();
            function.delete(2).unwrap();
            assert_eq!(function.capacity(), capacity);
        }
    }

    mod clone_tests {
        use super::*;

        #[test]
        fn test_clone_is_detached() {
            let original = sample();
            let mut copy = original.clone();
            copy.set_y(0, 99.0).unwrap();
            copy.insert(Point::new(5.0, 5.0)).unwrap();
            assert_eq!(original.point_count(), 3);
            assert_eq!(original.y_at(0).unwrap(), 0.0);
            assert!(!original.approx_eq(&copy));
        }
    }
}
