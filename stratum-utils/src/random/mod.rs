//! Deterministic random sources.
//!
//! Noise output must be bit-identical across runs and platforms, so nothing
//! here touches an OS entropy source.

pub mod xoroshiro;

/// A seeded pseudo-random source.
pub trait Random {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Next value uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        // 53 high bits give every representable step in [0, 1).
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Next value uniformly distributed in `[min, max)`.
    fn next_f64_between(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// SplitMix64 finaliser.
///
/// Used to expand seeds and to hash lattice coordinates.
#[inline]
#[must_use]
pub const fn mix64(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Golden-ratio increment used by SplitMix64.
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
