//! Error types for tabulated-function construction, mutation and integration.
//!
//! All failures are local, synchronous and recoverable: construction failures
//! leave no object created, and mutation failures leave the instance
//! unchanged. Nothing is retried internally.

use thiserror::Error;

/// Failures reported by the tabulated-function engines and the utilities
/// built on their contract.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// An index-based accessor or mutator was called outside `[0, count)`.
    #[error("point index {index} is out of range for a function with {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    /// A coordinate mutation would break the ordering constraint against a
    /// neighbouring point.
    ///
    /// Carries the offending x-coordinate and the neighbouring bound it
    /// failed to clear.
    #[error("x-coordinate {x} violates the ordering bound {bound}")]
    OutOfDomainPoint { x: f64, bound: f64 },

    /// An inserted point's x-coordinate collides with an existing point
    /// within the comparison tolerance.
    #[error("a point with x-coordinate {x} already exists within tolerance")]
    DuplicateX { x: f64 },

    /// A deletion would shrink the function below the minimum point count.
    #[error("a tabulated function must keep at least {floor} points")]
    MinimumSizeViolation { floor: usize },

    /// A constructor was given input that cannot form a valid function:
    /// too few points, x-coordinates that are not strictly increasing, or
    /// borders in the wrong order.
    #[error("invalid construction: {reason}")]
    InvalidConstruction { reason: String },

    /// The integration utility was given bounds outside the function's
    /// domain or a non-positive step.
    #[error("invalid integration bounds: {reason}")]
    InvalidIntegrationBounds { reason: String },

    /// An I/O failure while reading or writing the binary layout.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
