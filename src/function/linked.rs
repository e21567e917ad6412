//! Doubly-linked circular-list storage engine.
//!
//! The ring is anchored on one sentinel node whose `next` is the first point
//! and whose `prev` is the last; nodes live in a slot arena (a `Vec` with a
//! free-list) and refer to each other by slot index, so the cyclic structure
//! never holds cyclic ownership.

use crate::errors::FunctionError;
use crate::function::{
    self, Function, MIN_POINTS, TabulatedFunction, check_move, check_points, interpolate_at,
    uniform_points, valued_points,
};
use crate::point::{EPSILON, Point};

/// Arena slot of the sentinel node. Its point payload is never read.
const SENTINEL: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    point: Point,
    prev: usize,
    next: usize,
}

/// A tabulated function backed by a sentinel-anchored circular list.
///
/// Index resolution walks from whichever end of the ring is closer, bounding
/// the walk to half the point count. Insertion and deletion relink a located
/// node in O(1); locating it by x or by index costs O(n).
///
/// # Examples
///
/// ```rust
/// use tabfn::{Function, LinkedTabulatedFunction, Point, TabulatedFunction};
///
/// let mut function = LinkedTabulatedFunction::from_points(vec![
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 2.0),
/// ])
/// .unwrap();
///
/// function.insert(Point::new(1.0, 5.0)).unwrap();
/// assert_eq!(function.point_count(), 3);
/// assert_eq!(function.value_at(1.0), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinkedTabulatedFunction {
    nodes: Vec<Node>,
    free: Vec<usize>,
    len: usize,
}

impl LinkedTabulatedFunction {
    /// Creates a function from an explicit point sequence.
    ///
    /// The sequence must hold at least [`MIN_POINTS`] points with strictly
    /// increasing, tolerance-separated x-coordinates.
    pub fn from_points(points: Vec<Point>) -> Result<Self, FunctionError> {
        check_points(&points)?;
        Ok(Self::linked_from(points))
    }

    /// Creates a zero-filled uniform grid of `count` points over
    /// `[left, right]`.
    pub fn uniform(left: f64, right: f64, count: usize) -> Result<Self, FunctionError> {
        Ok(Self::linked_from(uniform_points(left, right, count)?))
    }

    /// Creates a uniform grid over `[left, right]` with the supplied
    /// y-values, one per grid node.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<Self, FunctionError> {
        Ok(Self::linked_from(valued_points(left, right, values)?))
    }

    /// Reads a function from the canonical binary layout.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, FunctionError> {
        Self::from_points(function::binary::read_points(reader)?)
    }

    fn linked_from(points: Vec<Point>) -> Self {
        let mut function = Self::empty();
        for point in points {
            function.link_before(SENTINEL, point);
        }
        function
    }

    fn empty() -> Self {
        LinkedTabulatedFunction {
            nodes: vec![Node {
                point: Point::new(f64::NAN, f64::NAN),
                prev: SENTINEL,
                next: SENTINEL,
            }],
            free: Vec::new(),
            len: 0,
        }
    }

    fn head(&self) -> usize {
        self.nodes[SENTINEL].next
    }

    fn tail(&self) -> usize {
        self.nodes[SENTINEL].prev
    }

    fn check_index(&self, index: usize) -> Result<(), FunctionError> {
        if index >= self.len {
            return Err(FunctionError::IndexOutOfRange {
                index,
                count: self.len,
            });
        }
        Ok(())
    }

    /// Resolves an index to its arena slot, walking from the nearer end of
    /// the ring. The caller must have validated the index.
    fn slot_at(&self, index: usize) -> usize {
        if index < self.len / 2 {
            let mut slot = self.head();
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
            slot
        } else {
            let mut slot = SENTINEL;
            for _ in index..self.len {
                slot = self.nodes[slot].prev;
            }
            slot
        }
    }

    /// Links a fresh node holding `point` just before `next_slot`, reusing a
    /// recycled arena slot when one is available.
    fn link_before(&mut self, next_slot: usize, point: Point) -> usize {
        let prev_slot = self.nodes[next_slot].prev;
        let node = Node {
            point,
            prev: prev_slot,
            next: next_slot,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[prev_slot].next = slot;
        self.nodes[next_slot].prev = slot;
        self.len += 1;
        slot
    }

    /// Unlinks the node at `slot` and recycles its arena slot.
    fn unlink(&mut self, slot: usize) {
        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(slot);
        self.len -= 1;
    }
}

impl Function for LinkedTabulatedFunction {
    fn value_at(&self, x: f64) -> f64 {
        interpolate_at(self, x)
    }

    fn left_border(&self) -> f64 {
        if self.len == 0 {
            return f64::NAN;
        }
        self.nodes[self.head()].point.x
    }

    fn right_border(&self) -> f64 {
        if self.len == 0 {
            return f64::NAN;
        }
        self.nodes[self.tail()].point.x
    }
}

impl TabulatedFunction for LinkedTabulatedFunction {
    fn point_count(&self) -> usize {
        self.len
    }

    fn point_at(&self, index: usize) -> Result<Point, FunctionError> {
        self.check_index(index)?;
        Ok(self.nodes[self.slot_at(index)].point)
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), FunctionError> {
        self.check_index(index)?;
        check_move(self, index, point.x)?;
        let slot = self.slot_at(index);
        self.nodes[slot].point = point;
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        self.check_index(index)?;
        let slot = self.slot_at(index);
        self.nodes[slot].point.y = y;
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
            self.link_before(SENTINEL, point);
            return Ok(());
        }

        // First node whose x is at or beyond the new point; bounded because
        // the tail's x is at least point.x.
        let mut slot = self.head();
        while self.nodes[slot].point.x < point.x {
            slot = self.nodes[slot].next;
        }
        if (self.nodes[slot].point.x - point.x).abs() < EPSILON {
            return Err(FunctionError::DuplicateX { x: point.x });
        }
        self.link_before(slot, point);
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<(), FunctionError> {
        self.check_index(index)?;
        if self.len <= MIN_POINTS {
            return Err(FunctionError::MinimumSizeViolation { floor: MIN_POINTS });
        }
        let slot = self.slot_at(index);
        self.unlink(slot);
        Ok(())
    }
}

impl std::fmt::Display for LinkedTabulatedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
