//! Elementary analytic functions implementing the [`Function`] contract.

use crate::function::Function;

/// The logarithm to a fixed base, defined for positive x.
#[derive(Debug, Clone, Copy)]
pub struct Log {
    base: f64,
}

impl Log {
    /// Creates a logarithm with the given base.
    ///
    /// Degenerate bases (non-positive or 1) evaluate to NaN the way the
    /// underlying [`f64::log`] does.
    pub fn new(base: f64) -> Self {
        Log { base }
    }

    /// The logarithm base.
    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Function for Log {
    fn value_at(&self, x: f64) -> f64 {
        x.log(self.base)
    }

    fn left_border(&self) -> f64 {
        0.0
    }
}

/// The natural exponential, defined everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl Function for Exp {
    fn value_at(&self, x: f64) -> f64 {
        x.exp()
    }
}
