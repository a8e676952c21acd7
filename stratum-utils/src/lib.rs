//! Leaf utilities for layered gradient noise.
//!
//! Everything here is free of scheduling concerns: lattice math, the seeded
//! random source, gradient tables, the bound grid used for interpolation and
//! the circularity correction that keeps wrapped dimensions seamless.

pub mod bound_grid;
pub mod circularity;
pub mod error;
pub mod gradient;
pub mod math;
pub mod random;

pub use bound_grid::BoundGrid;
pub use circularity::{correct_interpolation_points_for_circularity, wrap_index};
pub use error::ArgumentError;
pub use gradient::GradientTables;
