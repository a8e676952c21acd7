//! Errors raised when a caller passes a structurally invalid argument.

use thiserror::Error;

/// A structurally invalid argument, always detected at the call that received it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// A count of requested values was zero.
    #[error("Requested count must be at least 1")]
    NonPositiveCount,
    /// A circularity argument was zero.
    #[error("{name} must be positive")]
    NonPositive {
        /// Which argument was zero.
        name: &'static str,
    },
    /// The circular dimension is shorter than the requested interpolation points.
    #[error("Dimension length {length} is shorter than the requested {requested} interpolation points")]
    LengthShorterThanRequest {
        /// Requested interpolation points.
        requested: usize,
        /// Length of the circular dimension.
        length: usize,
    },
    /// A lattice distance cannot be made to divide a circular dimension.
    #[error("Interpolation points {points} do not divide circular length {length}")]
    NotCircular {
        /// Interpolation points of the step size.
        points: usize,
        /// Length of the circular dimension.
        length: usize,
    },
    /// A dimension outside the supported range.
    #[error("Dimension {0} is outside [{min}, {max}]", min = crate::bound_grid::MIN_DIMENSION, max = crate::bound_grid::MAX_DIMENSION)]
    DimensionOutOfRange(usize),
    /// A bound count outside the supported range.
    #[error("Number of bounds {0} is outside [{min}, {max}]", min = crate::bound_grid::MIN_BOUNDS, max = crate::bound_grid::MAX_BOUNDS)]
    BoundsOutOfRange(usize),
    /// An index or coordinate array of the wrong length.
    #[error("Expected {expected} components, got {got}")]
    DimensionMismatch {
        /// Number of dimensions expected.
        expected: usize,
        /// Number of components supplied.
        got: usize,
    },
    /// A bound index outside the grid.
    #[error("Bound index {index} is outside the {bounds} bounds of the grid")]
    BoundIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Bounds per dimension.
        bounds: usize,
    },
    /// Two result frames of different shapes were combined.
    #[error("Cannot combine a {left} frame with a {right} frame")]
    ShapeMismatch {
        /// Shape of the accumulating frame.
        left: String,
        /// Shape of the incoming frame.
        right: String,
    },
    /// A fixed output length of zero.
    #[error("{name} must be at least 1")]
    EmptyExtent {
        /// Which extent was zero.
        name: &'static str,
    },
}
