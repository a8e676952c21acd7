//! Circularity correction for lattice sampling.
//!
//! A dimension of fixed length tiles seamlessly when the number of samples per
//! lattice cell divides that length and lattice indices wrap at the resulting
//! period. Sampling at the seam then reads the same gradients as index 0.

use crate::error::ArgumentError;

/// Wraps a lattice index into `[0, bound)`, also for negative indices.
///
/// A non-positive bound leaves the index untouched.
#[inline]
#[must_use]
pub const fn wrap_index(index: i64, bound: i64) -> i64 {
    if bound <= 0 {
        return index;
    }
    ((index % bound) + bound) % bound
}

/// Returns the factor of `dimension_length` closest to `requested`.
///
/// Ties resolve to the smaller factor. The result always divides
/// `dimension_length`, so applying the correction to its own output is a no-op.
pub fn correct_interpolation_points_for_circularity(
    requested: usize,
    dimension_length: usize,
) -> Result<usize, ArgumentError> {
    if requested == 0 {
        return Err(ArgumentError::NonPositive {
            name: "requested interpolation points",
        });
    }
    if dimension_length == 0 {
        return Err(ArgumentError::NonPositive {
            name: "dimension length",
        });
    }
    if dimension_length < requested {
        return Err(ArgumentError::LengthShorterThanRequest {
            requested,
            length: dimension_length,
        });
    }
    if dimension_length % requested == 0 {
        return Ok(requested);
    }

    // Walk outwards; checking the lower candidate first resolves ties downwards.
    for offset in 1..requested {
        let lower = requested - offset;
        if dimension_length % lower == 0 {
            let upper = (requested + 1..=requested + offset).find(|u| dimension_length % u == 0);
            return Ok(upper.filter(|u| u - requested < offset).unwrap_or(lower));
        }
    }
    // `1` always divides, so the loop above returns for any requested >= 2.
    Ok(1)
}
