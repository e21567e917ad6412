//! # Tabulated functions
//!
//! A tabulated function is a real-valued function represented by a finite set
//! of `(x, y)` samples with strictly increasing x-coordinates, evaluated
//! between samples by piecewise-linear interpolation. Two interchangeable
//! storage engines implement the same contract:
//!
//! - [`ArrayTabulatedFunction`] — one contiguous growable buffer.
//! - [`LinkedTabulatedFunction`] — a doubly-linked circular list anchored on
//!   a sentinel node, realized over a slot arena.
//!
//! Both engines are drop-in substitutable: the same construction and
//! operation sequence yields structurally equal results on either one.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabfn::{ArrayTabulatedFunction, Function, Point, TabulatedFunction};
//!
//! let mut function = ArrayTabulatedFunction::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 4.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(function.value_at(0.5), 0.5);
//! assert!(function.value_at(3.0).is_nan());
//!
//! function.insert(Point::new(1.5, 2.5)).unwrap();
//! assert_eq!(function.point_count(), 4);
//! ```
//!
//! ## Contract shape
//!
//! [`Function`] is the minimal evaluation contract (value and domain
//! borders) consumed by the integration utility and the combinator layer.
//! [`TabulatedFunction`] extends it with the full capability set: indexed
//! access and mutation, sorted insertion, floored deletion, tolerant
//! structural equality, stable hashing and text rendering. The shared
//! algorithms live here as provided methods and free helpers, expressed once
//! against the contract's accessors, so each engine keeps its own cost model
//! (the list engine observably pays a node walk per indexed access).

pub mod array;
pub mod basic;
pub mod binary;
pub mod linked;
pub mod ops;

use std::fmt::Write as _;

use itertools::Itertools;

use crate::errors::FunctionError;
use crate::point::{EPSILON, Point};

pub use array::ArrayTabulatedFunction;
pub use linked::LinkedTabulatedFunction;

/// The minimum number of points a tabulated function may hold.
///
/// Applied uniformly: every constructor requires at least this many points,
/// and [`TabulatedFunction::delete`] refuses to shrink a function below it.
pub const MIN_POINTS: usize = 2;

/// The evaluation contract: a real-valued function over an x-interval.
///
/// Tabulated engines, analytic functions and the combinator adapters all
/// implement this. The default borders describe an unbounded domain.
pub trait Function {
    /// Evaluates the function at `x`.
    ///
    /// Implementations return NaN for x-values outside the domain rather
    /// than failing.
    fn value_at(&self, x: f64) -> f64;

    /// The lowest x-value of the evaluable interval.
    fn left_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// The highest x-value of the evaluable interval.
    fn right_border(&self) -> f64 {
        f64::INFINITY
    }
}

/// The full capability set shared by both storage engines.
///
/// Every point crossing this boundary is a copy; mutating a returned
/// [`Point`] never affects the container. All mutators validate before
/// touching storage, so a failed call leaves the instance unchanged.
pub trait TabulatedFunction: Function {
    /// Number of live points. O(1) on both engines.
    fn point_count(&self) -> usize;

    /// Returns a copy of the point at `index`.
    fn point_at(&self, index: usize) -> Result<Point, FunctionError>;

    /// Replaces the point at `index`.
    ///
    /// The new x-coordinate must clear each existing neighbour by at least
    /// the comparison tolerance, keeping the samples strictly increasing.
    fn set_point(&mut self, index: usize, point: Point) -> Result<(), FunctionError>;

    /// Replaces the y-coordinate at `index`. Unconditional apart from the
    /// index check.
    fn set_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError>;

    /// Inserts a new point, keeping the samples sorted by x.
    ///
    /// A point beyond the right border is appended; anything else is placed
    /// before the first existing point with a greater-or-equal x. An
    /// x-coordinate colliding with an existing point within tolerance fails
    /// with [`FunctionError::DuplicateX`].
    fn insert(&mut self, point: Point) -> Result<(), FunctionError>;

    /// Removes the point at `index`.
    ///
    /// Fails with [`FunctionError::MinimumSizeViolation`] when the function
    /// already holds only [`MIN_POINTS`] points.
    fn delete(&mut self, index: usize) -> Result<(), FunctionError>;

    /// Returns the x-coordinate at `index`.
    fn x_at(&self, index: usize) -> Result<f64, FunctionError> {
        Ok(self.point_at(index)?.x)
    }

    /// Returns the y-coordinate at `index`.
    fn y_at(&self, index: usize) -> Result<f64, FunctionError> {
        Ok(self.point_at(index)?.y)
    }

    /// Replaces the x-coordinate at `index`, subject to the same
    /// neighbour bounds as [`set_point`](TabulatedFunction::set_point).
    fn set_x(&mut self, index: usize, x: f64) -> Result<(), FunctionError> {
        let y = self.y_at(index)?;
        self.set_point(index, Point::new(x, y))
    }

    /// Structural equality within the comparison tolerance.
    ///
    /// Two functions are equal when they hold the same number of points and
    /// every corresponding pair of points matches coordinate-wise within
    /// [`EPSILON`]. Works across engine types and never fails.
    fn approx_eq<F: TabulatedFunction + ?Sized>(&self, other: &F) -> bool {
        if self.point_count() != other.point_count() {
            return false;
        }
        for index in 0..self.point_count() {
            match (self.point_at(index), other.point_at(index)) {
                (Ok(mine), Ok(theirs)) if mine.approx_eq(&theirs) => {}
                _ => return false,
            }
        }
        true
    }

    /// A hash folding the point count and every point's coordinate bits,
    /// so structurally identical functions hash equal regardless of engine.
    fn stable_hash(&self) -> u64 {
        let mut hash = fnv_fold(FNV_OFFSET_BASIS, self.point_count() as u64);
        for index in 0..self.point_count() {
            if let Ok(point) = self.point_at(index) {
                hash = fnv_fold(hash, point.x.to_bits());
                hash = fnv_fold(hash, point.y.to_bits());
            }
        }
        hash
    }

    /// Renders the function as `{(x ; y)(x ; y)...}` in index order.
    fn render(&self) -> String {
        let mut rendered = String::from("{");
        for index in 0..self.point_count() {
            if let Ok(point) = self.point_at(index) {
                let _ = write!(rendered, "{point}");
            }
        }
        rendered.push('}');
        rendered
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over one 64-bit word, little-endian byte order.
fn fnv_fold(mut hash: u64, word: u64) -> u64 {
    for byte in word.to_le_bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Piecewise-linear evaluation shared by both engines.
///
/// NaN outside `[left, right]`; the stored y when x matches any sample
/// within tolerance; linear interpolation between the bracketing samples
/// otherwise. The forward scan is bounded: once x is strictly interior, a
/// sample with a greater x always exists.
pub(crate) fn interpolate_at<F: TabulatedFunction + ?Sized>(function: &F, x: f64) -> f64 {
    let left = function.left_border();
    let right = function.right_border();
    if x < left || x > right {
        return f64::NAN;
    }

    let Ok(first) = function.point_at(0) else {
        return f64::NAN;
    };
    if (x - left).abs() < EPSILON {
        return first.y;
    }
    let count = function.point_count();
    let Ok(last) = function.point_at(count - 1) else {
        return f64::NAN;
    };
    if (x - right).abs() < EPSILON {
        return last.y;
    }

    let mut previous = first;
    for index in 1..count {
        let Ok(current) = function.point_at(index) else {
            return f64::NAN;
        };
        if (x - current.x).abs() < EPSILON {
            return current.y;
        }
        if x < current.x {
            return previous.y
                + (current.y - previous.y) * (x - previous.x) / (current.x - previous.x);
        }
        previous = current;
    }

    // Only reachable for a NaN x, which is outside any domain.
    f64::NAN
}

/// Validates that a moved x-coordinate clears both neighbours of `index`.
///
/// The comparisons are written negated so that a NaN coordinate fails the
/// bound instead of slipping past it.
pub(crate) fn check_move<F: TabulatedFunction + ?Sized>(
    function: &F,
    index: usize,
    x: f64,
) -> Result<(), FunctionError> {
    if index > 0 {
        let lower = function.x_at(index - 1)?;
        if !(x - lower >= EPSILON) {
            return Err(FunctionError::OutOfDomainPoint { x, bound: lower });
        }
    }
    if index + 1 < function.point_count() {
        let upper = function.x_at(index + 1)?;
        if !(upper - x >= EPSILON) {
            return Err(FunctionError::OutOfDomainPoint { x, bound: upper });
        }
    }
    Ok(())
}

/// Validates an explicit point sequence for construction: at least
/// [`MIN_POINTS`] samples, finite x-coordinates, strictly increasing with at
/// least [`EPSILON`] separation.
pub(crate) fn check_points(points: &[Point]) -> Result<(), FunctionError> {
    if points.len() < MIN_POINTS {
        return Err(FunctionError::InvalidConstruction {
            reason: format!(
                "a tabulated function needs at least {MIN_POINTS} points, got {}",
                points.len()
            ),
        });
    }
    for (index, point) in points.iter().enumerate() {
        if !point.x.is_finite() {
            return Err(FunctionError::InvalidConstruction {
                reason: format!("x[{index}] = {} is not a finite coordinate", point.x),
            });
        }
    }
    for ((left_index, previous), (_, current)) in points.iter().enumerate().tuple_windows() {
        if !(current.x - previous.x >= EPSILON) {
            return Err(FunctionError::InvalidConstruction {
                reason: format!(
                    "x-coordinates must be strictly increasing: x[{left_index}] = {} is not \
                     cleared by its successor {}",
                    previous.x, current.x
                ),
            });
        }
    }
    Ok(())
}

/// Builds a uniform grid of `count` points over `[left, right]` with the
/// given y-values (one per grid node).
pub(crate) fn valued_points(
    left: f64,
    right: f64,
    values: &[f64],
) -> Result<Vec<Point>, FunctionError> {
    if !(left < right) {
        return Err(FunctionError::InvalidConstruction {
            reason: format!("left border {left} must lie strictly below right border {right}"),
        });
    }
    if values.len() < MIN_POINTS {
        return Err(FunctionError::InvalidConstruction {
            reason: format!(
                "a uniform grid needs at least {MIN_POINTS} points, got {}",
                values.len()
            ),
        });
    }
    let step = (right - left) / (values.len() - 1) as f64;
    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(index, &y)| Point::new(left + step * index as f64, y))
        .collect();
    // Re-checked as a whole: a grid denser than the tolerance is rejected.
    check_points(&points)?;
    Ok(points)
}

/// Builds a zero-filled uniform grid of `count` points over `[left, right]`.
pub(crate) fn uniform_points(
    left: f64,
    right: f64,
    count: usize,
) -> Result<Vec<Point>, FunctionError> {
    if count < MIN_POINTS {
        return Err(FunctionError::InvalidConstruction {
            reason: format!("a uniform grid needs at least {MIN_POINTS} points, got {count}"),
        });
    }
    valued_points(left, right, &vec![0.0; count])
}

/// The closed set of storage engines behind one dispatchable value.
///
/// Useful when the engine is selected at run time; every contract method
/// delegates to the wrapped engine.
///
/// # Examples
///
/// ```rust
/// use tabfn::{ArrayTabulatedFunction, Engine, Function, TabulatedFunction};
///
/// let engine: Engine = ArrayTabulatedFunction::uniform(0.0, 1.0, 5).unwrap().into();
/// assert_eq!(engine.point_count(), 5);
/// assert_eq!(engine.value_at(0.5), 0.0);
/// ```
#[derive(Debug, Clone)]
pub enum Engine {
    /// Contiguous growable-array storage.
    Array(ArrayTabulatedFunction),
    /// Sentinel-anchored circular-list storage.
    Linked(LinkedTabulatedFunction),
}

impl Function for Engine {
    fn value_at(&self, x: f64) -> f64 {
        match self {
            Engine::Array(function) => function.value_at(x),
            Engine::Linked(function) => function.value_at(x),
        }
    }

    fn left_border(&self) -> f64 {
        match self {
            Engine::Array(function) => function.left_border(),
            Engine::Linked(function) => function.left_border(),
        }
    }

    fn right_border(&self) -> f64 {
        match self {
            Engine::Array(function) => function.right_border(),
            Engine::Linked(function) => function.right_border(),
        }
    }
}

impl TabulatedFunction for Engine {
    fn point_count(&self) -> usize {
        match self {
            Engine::Array(function) => function.point_count(),
            Engine::Linked(function) => function.point_count(),
        }
    }

    fn point_at(&self, index: usize) -> Result<Point, FunctionError> {
        match self {
            Engine::Array(function) => function.point_at(index),
            Engine::Linked(function) => function.point_at(index),
        }
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), FunctionError> {
        match self {
            Engine::Array(function) => function.set_point(index, point),
            Engine::Linked(function) => function.set_point(index, point),
        }
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        match self {
            Engine::Array(function) => function.set_y(index, y),
            Engine::Linked(function) => function.set_y(index, y),
        }
    }

    fn insert(&mut self, point: Point) -> Result<(), FunctionError> {
        match self {
            Engine::Array(function) => function.insert(point),
            Engine::Linked(function) => function.insert(point),
        }
    }

    fn delete(&mut self, index: usize) -> Result<(), FunctionError> {
        match self {
            Engine::Array(function) => function.delete(index),
            Engine::Linked(function) => function.delete(index),
        }
    }
}

impl From<ArrayTabulatedFunction> for Engine {
    fn from(function: ArrayTabulatedFunction) -> Self {
        Engine::Array(function)
    }
}

impl From<LinkedTabulatedFunction> for Engine {
    fn from(function: LinkedTabulatedFunction) -> Self {
        Engine::Linked(function)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
