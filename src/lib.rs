//! # tabfn
//!
//! Tabulated real-valued functions: a finite set of `(x, y)` samples with
//! strictly increasing x-coordinates, evaluated between samples by
//! piecewise-linear interpolation.
//!
//! Two interchangeable storage engines implement one shared contract —
//! [`ArrayTabulatedFunction`] over a contiguous growable buffer and
//! [`LinkedTabulatedFunction`] over a sentinel-anchored circular list — and
//! a set of collaborators consume that contract: the trapezoid-rule
//! [`integrate`] utility, the algebraic combinators ([`shift`], [`scale`],
//! [`sum`], …) and the producer/consumer [`tasking`] demonstration.
//!
//! ```rust
//! use tabfn::{Function, LinkedTabulatedFunction, Point, TabulatedFunction, integrate};
//!
//! let mut function = LinkedTabulatedFunction::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 2.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(function.value_at(1.5), 1.5);
//! assert_eq!(integrate(&function, 0.0, 2.0, 1.0).unwrap(), 2.0);
//!
//! function.insert(Point::new(3.0, 0.0)).unwrap();
//! assert_eq!(function.right_border(), 3.0);
//! ```

pub mod errors;
pub mod function;
pub mod integrate;
pub mod point;
pub mod tasking;

mod test_utils;

pub use crate::errors::FunctionError;
pub use crate::function::basic::{Exp, Log};
pub use crate::function::ops::{compose, power, product, scale, shift, sum};
pub use crate::function::{
    ArrayTabulatedFunction, Engine, Function, LinkedTabulatedFunction, MIN_POINTS,
    TabulatedFunction,
};
pub use crate::integrate::integrate;
pub use crate::point::{EPSILON, Point};
