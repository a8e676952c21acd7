//! Unit gradient tables and seeded lattice lookup.
//!
//! - 1D: the two unit "vectors" `-1` and `+1`
//! - 2D: 360 unit vectors, one per whole degree
//! - 3D: 10000 unit vectors drawn by rejection sampling from a fixed seed
//!
//! The tables are immutable once built. [`GradientTables::global`] builds them
//! on first call; builders call it before any octave exists, so sampling never
//! races the initialisation.

use std::sync::LazyLock;

use crate::error::ArgumentError;
use crate::random::xoroshiro::Xoroshiro;
use crate::random::{GOLDEN_GAMMA, Random, mix64};

/// Number of 2D gradients.
pub const GRADIENTS_2D: usize = 360;
/// Number of 3D gradients.
pub const GRADIENTS_3D: usize = 10_000;
/// Candidates shorter than this are rejected before normalising.
pub const MIN_SAMPLE_LENGTH: f64 = 1e-4;
/// Highest dimension with a gradient table.
pub const MAX_GRADIENT_DIMENSION: usize = 3;

/// Seed of the 3D rejection sampler. Part of the output format: changing it
/// changes every 3D noise value.
const TABLE_SEED_3D: u64 = 0x5EED_0003_D6A1_0000;

/// Per-axis multipliers so that `(a, b)` and `(b, a)` hash differently.
const AXIS_KEYS: [u64; 5] = [
    0xD6E8_FEB8_6659_FD93,
    0xA076_1D64_78BD_642F,
    0xE703_7ED1_A0B4_28DB,
    0x8EBC_6AF0_9C88_C6E3,
    0x5894_65FC_3F8C_4F55,
];

static TABLES: LazyLock<GradientTables> = LazyLock::new(GradientTables::build);

/// Gradient tables for 1 to 3 dimensions, stored flat with a stride of the dimension.
#[derive(Debug)]
pub struct GradientTables {
    tables: [Vec<f64>; MAX_GRADIENT_DIMENSION],
}

impl GradientTables {
    /// The process-wide tables, built on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLES
    }

    fn build() -> Self {
        let one = vec![-1.0, 1.0];

        let mut two = Vec::with_capacity(GRADIENTS_2D * 2);
        for degree in 0..GRADIENTS_2D {
            let angle = (degree as f64).to_radians();
            two.push(angle.cos());
            two.push(angle.sin());
        }

        let mut rng = Xoroshiro::from_seed(TABLE_SEED_3D);
        let mut three = Vec::with_capacity(GRADIENTS_3D * 3);
        let mut rejected = 0usize;
        while three.len() < GRADIENTS_3D * 3 {
            let x = rng.next_f64_between(-1.0, 1.0);
            let y = rng.next_f64_between(-1.0, 1.0);
            let z = rng.next_f64_between(-1.0, 1.0);
            let length = (x * x + y * y + z * z).sqrt();
            // Keeping only the unit ball makes the directions uniform.
            if !(MIN_SAMPLE_LENGTH..=1.0).contains(&length) {
                rejected += 1;
                continue;
            }
            three.extend([x / length, y / length, z / length]);
        }

        log::debug!(
            "Gradient tables built: {} 2D, {} 3D ({rejected} candidates rejected)",
            GRADIENTS_2D,
            GRADIENTS_3D
        );

        Self {
            tables: [one, two, three],
        }
    }

    /// Number of gradients in the table for `dimension`.
    pub fn len(&self, dimension: usize) -> Result<usize, ArgumentError> {
        Ok(self.table(dimension)?.len() / dimension)
    }

    /// Gradient at `index` (modulo the table size) for `dimension`.
    pub fn get(&self, dimension: usize, index: usize) -> Result<&[f64], ArgumentError> {
        let table = self.table(dimension)?;
        let start = (index % (table.len() / dimension)) * dimension;
        Ok(&table[start..start + dimension])
    }

    /// The gradient assigned to a lattice point for a seed.
    ///
    /// The dimension is the length of `lattice`. Same seed and coordinate always
    /// give the same vector.
    pub fn gradient(&self, seed: u64, lattice: &[i64]) -> Result<&[f64], ArgumentError> {
        let dimension = lattice.len();
        let count = self.len(dimension)? as u64;
        let index = lattice_hash(seed, lattice) % count;
        self.get(dimension, index as usize)
    }

    fn table(&self, dimension: usize) -> Result<&Vec<f64>, ArgumentError> {
        if dimension == 0 || dimension > MAX_GRADIENT_DIMENSION {
            return Err(ArgumentError::DimensionOutOfRange(dimension));
        }
        Ok(&self.tables[dimension - 1])
    }
}

/// Hashes a seed and a lattice coordinate into 64 bits.
#[inline]
#[must_use]
pub fn lattice_hash(seed: u64, lattice: &[i64]) -> u64 {
    let mut hash = mix64(seed ^ GOLDEN_GAMMA);
    for (axis, &coordinate) in lattice.iter().enumerate() {
        let key = AXIS_KEYS[axis % AXIS_KEYS.len()];
        hash = mix64(hash ^ (coordinate as u64).wrapping_mul(key));
    }
    hash
}
