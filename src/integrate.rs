//! Definite integration over the [`Function`] contract.

use std::iter;

use itertools::Itertools;

use crate::errors::FunctionError;
use crate::function::Function;
use crate::point::EPSILON;

/// Computes the definite integral of `function` over `[left, right]` with
/// the trapezoid rule, sampling every `step` along x.
///
/// The final sub-interval is clamped so the last sample lands exactly on the
/// right bound. Reversed bounds integrate the swapped interval and negate
/// the result; equal bounds yield zero. Bounds must lie within the
/// function's domain (within the comparison tolerance) and the step must be
/// positive, otherwise [`FunctionError::InvalidIntegrationBounds`] is
/// returned.
///
/// # Examples
///
/// ```rust
/// use tabfn::{ArrayTabulatedFunction, integrate};
///
/// // A straight line is integrated exactly by trapezoids.
/// let line = ArrayTabulatedFunction::with_values(0.0, 2.0, &[0.0, 1.0, 2.0]).unwrap();
/// assert_eq!(integrate(&line, 0.0, 2.0, 1.0).unwrap(), 2.0);
/// ```
pub fn integrate<F>(function: &F, left: f64, right: f64, step: f64) -> Result<f64, FunctionError>
where
    F: Function + ?Sized,
{
    if !(step > 0.0) {
        return Err(FunctionError::InvalidIntegrationBounds {
            reason: format!("step must be positive, got {step}"),
        });
    }
    if !(left.is_finite() && right.is_finite()) {
        return Err(FunctionError::InvalidIntegrationBounds {
            reason: format!("bounds [{left}, {right}] must be finite"),
        });
    }

    let (lo, hi) = if left <= right { (left, right) } else { (right, left) };
    if lo < function.left_border() - EPSILON || hi > function.right_border() + EPSILON {
        return Err(FunctionError::InvalidIntegrationBounds {
            reason: format!(
                "[{lo}, {hi}] lies outside the function domain [{}, {}]",
                function.left_border(),
                function.right_border()
            ),
        });
    }

    if left == right {
        return Ok(0.0);
    }
    if left > right {
        return Ok(-integrate(function, right, left, step)?);
    }

    let grid = itertools::iterate(left, move |x| x + step)
        .take_while(move |x| *x < right)
        .chain(iter::once(right));
    let total: f64 = grid
        .tuple_windows()
        .map(|(x0, x1)| (x1 - x0) * (function.value_at(x0) + function.value_at(x1)) / 2.0)
        .sum();
    Ok(total)
}
