//! Small numeric helpers shared by the noise kernels.

/// Largest `f64` strictly below `1.0`.
pub const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Floor of `value` as a lattice coordinate.
///
/// Faster than `f64::floor` followed by a cast, and saturates instead of
/// wrapping for coordinates outside the `i64` range.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i64 {
    let truncated = value as i64;
    if value < truncated as f64 {
        truncated - 1
    } else {
        truncated
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
///
/// First and second derivatives vanish at `t = 0` and `t = 1`.
#[inline]
#[must_use]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Maps a value from `[-bound, bound]` into `[0, 1)`.
///
/// Values outside the bound (only possible through rounding) are clamped.
#[inline]
#[must_use]
pub fn to_unit_interval(value: f64, bound: f64) -> f64 {
    (value / (2.0 * bound) + 0.5).clamp(0.0, BELOW_ONE)
}
