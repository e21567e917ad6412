//! Algebraic adapters over the [`Function`] contract.
//!
//! Each adapter wraps one or two functions and evaluates lazily, the same
//! way iterator adapters wrap iterators. Free constructor functions are the
//! intended entry points:
//!
//! ```rust
//! use tabfn::{ArrayTabulatedFunction, Function, shift, sum};
//!
//! let base = ArrayTabulatedFunction::with_values(0.0, 2.0, &[0.0, 1.0, 2.0]).unwrap();
//! let lifted = shift(base.clone(), 0.0, 10.0);
//! assert_eq!(lifted.value_at(1.0), 11.0);
//!
//! let doubled = sum(base.clone(), base);
//! assert_eq!(doubled.value_at(1.0), 2.0);
//! ```

use crate::function::Function;

/// Translates a function by `dx` along x and `dy` along y.
pub fn shift<F: Function>(function: F, dx: f64, dy: f64) -> Shifted<F> {
    Shifted { function, dx, dy }
}

/// Stretches a function by `sx` along x and `sy` along y.
///
/// A negative `sx` mirrors the domain; `sx` is expected to be non-zero.
pub fn scale<F: Function>(function: F, sx: f64, sy: f64) -> Scaled<F> {
    Scaled { function, sx, sy }
}

/// Raises a function's values to the power `exponent`.
pub fn power<F: Function>(function: F, exponent: f64) -> Power<F> {
    Power { function, exponent }
}

/// Pointwise sum of two functions over the intersection of their domains.
pub fn sum<F: Function, G: Function>(first: F, second: G) -> Sum<F, G> {
    Sum { first, second }
}

/// Pointwise product of two functions over the intersection of their
/// domains.
pub fn product<F: Function, G: Function>(first: F, second: G) -> Product<F, G> {
    Product { first, second }
}

/// Function composition `outer(inner(x))`, evaluated over `inner`'s domain.
pub fn compose<F: Function, G: Function>(outer: F, inner: G) -> Composed<F, G> {
    Composed { outer, inner }
}

/// See [`shift`].
#[derive(Debug, Clone)]
pub struct Shifted<F> {
    function: F,
    dx: f64,
    dy: f64,
}

impl<F: Function> Function for Shifted<F> {
    fn value_at(&self, x: f64) -> f64 {
        self.function.value_at(x - self.dx) + self.dy
    }

    fn left_border(&self) -> f64 {
        self.function.left_border() + self.dx
    }

    fn right_border(&self) -> f64 {
        self.function.right_border() + self.dx
    }
}

/// See [`scale`].
#[derive(Debug, Clone)]
pub struct Scaled<F> {
    function: F,
    sx: f64,
    sy: f64,
}

impl<F: Function> Function for Scaled<F> {
    fn value_at(&self, x: f64) -> f64 {
        self.sy * self.function.value_at(x / self.sx)
    }

    fn left_border(&self) -> f64 {
        let scaled = self.function.left_border() * self.sx;
        scaled.min(self.function.right_border() * self.sx)
    }

    fn right_border(&self) -> f64 {
        let scaled = self.function.right_border() * self.sx;
        scaled.max(self.function.left_border() * self.sx)
    }
}

/// See [`power`].
#[derive(Debug, Clone)]
pub struct Power<F> {
    function: F,
    exponent: f64,
}

impl<F: Function> Function for Power<F> {
    fn value_at(&self, x: f64) -> f64 {
        self.function.value_at(x).powf(self.exponent)
    }

    fn left_border(&self) -> f64 {
        self.function.left_border()
    }

    fn right_border(&self) -> f64 {
        self.function.right_border()
    }
}

/// See [`sum`].
#[derive(Debug, Clone)]
pub struct Sum<F, G> {
    first: F,
    second: G,
}

impl<F: Function, G: Function> Function for Sum<F, G> {
    fn value_at(&self, x: f64) -> f64 {
        self.first.value_at(x) + self.second.value_at(x)
    }

    fn left_border(&self) -> f64 {
        self.first.left_border().max(self.second.left_border())
    }

    fn right_border(&self) -> f64 {
        self.first.right_border().min(self.second.right_border())
    }
}

/// See [`product`].
#[derive(Debug, Clone)]
pub struct Product<F, G> {
    first: F,
    second: G,
}

impl<F: Function, G: Function> Function for Product<F, G> {
    fn value_at(&self, x: f64) -> f64 {
        self.first.value_at(x) * self.second.value_at(x)
    }

    fn left_border(&self) -> f64 {
        self.first.left_border().max(self.second.left_border())
    }

    fn right_border(&self) -> f64 {
        self.first.right_border().min(self.second.right_border())
    }
}

/// See [`compose`].
#[derive(Debug, Clone)]
pub struct Composed<F, G> {
    outer: F,
    inner: G,
}

impl<F: Function, G: Function> Function for Composed<F, G> {
    fn value_at(&self, x: f64) -> f64 {
        self.outer.value_at(self.inner.value_at(x))
    }

    fn left_border(&self) -> f64 {
        self.inner.left_border()
    }

    fn right_border(&self) -> f64 {
        self.inner.right_border()
    }
}
