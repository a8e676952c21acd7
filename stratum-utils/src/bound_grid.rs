//! A small window of lattice gradients around the current sampling cell.
//!
//! A [`BoundGrid`] holds `bounds` lattice nodes per dimension, starting at an
//! origin node. Octave generators keep one grid for their whole lifetime and
//! refill it in place whenever the sampling position enters a new cell, so the
//! hot path never allocates.
//!
//! Dimensions that wrap carry a lattice period; node coordinates along them go
//! through [`wrap_index`] before the gradient lookup, so the node one period past
//! the seam is the same node as index 0.

use crate::circularity::wrap_index;
use crate::error::ArgumentError;
use crate::math::{fade, floor};

/// Smallest supported grid dimension.
pub const MIN_DIMENSION: usize = 1;
/// Largest supported grid dimension.
pub const MAX_DIMENSION: usize = 5;
/// Smallest supported number of nodes per dimension.
pub const MIN_BOUNDS: usize = 1;
/// Largest supported number of nodes per dimension.
pub const MAX_BOUNDS: usize = 5;

/// Gradient window of `bounds^dimension` lattice nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundGrid {
    dimension: usize,
    bounds: usize,
    origin: [i64; MAX_DIMENSION],
    filled: bool,
    gradients: Vec<f64>,
}

impl BoundGrid {
    /// Creates an empty grid.
    pub fn new(dimension: usize, bounds: usize) -> Result<Self, ArgumentError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(ArgumentError::DimensionOutOfRange(dimension));
        }
        if !(MIN_BOUNDS..=MAX_BOUNDS).contains(&bounds) {
            return Err(ArgumentError::BoundsOutOfRange(bounds));
        }
        let nodes = bounds.pow(dimension as u32);
        Ok(Self {
            dimension,
            bounds,
            origin: [0; MAX_DIMENSION],
            filled: false,
            gradients: vec![0.0; nodes * dimension],
        })
    }

    /// Number of dimensions.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of nodes per dimension.
    #[must_use]
    pub const fn bounds(&self) -> usize {
        self.bounds
    }

    /// Total number of nodes held.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.gradients.len() / self.dimension
    }

    /// Lattice coordinate of node `[0, .., 0]`, once the grid has been filled.
    #[must_use]
    pub fn origin(&self) -> Option<&[i64]> {
        self.filled.then(|| &self.origin[..self.dimension])
    }

    /// Whether the grid currently holds the window starting at `origin`.
    #[must_use]
    pub fn covers(&self, origin: &[i64]) -> bool {
        self.filled && origin == &self.origin[..self.dimension]
    }

    /// Marks the grid stale so the next [`covers`](Self::covers) check fails.
    pub const fn invalidate(&mut self) {
        self.filled = false;
    }

    /// Refills the window starting at `origin`.
    ///
    /// `periods[d]` is the lattice period of dimension `d`, or `None` if it does
    /// not wrap. `gradient` maps a lattice coordinate to its gradient vector.
    pub fn fill<'a, F>(
        &mut self,
        origin: &[i64],
        periods: &[Option<i64>],
        mut gradient: F,
    ) -> Result<(), ArgumentError>
    where
        F: FnMut(&[i64]) -> Result<&'a [f64], ArgumentError>,
    {
        self.check_len(origin.len())?;
        self.check_len(periods.len())?;

        self.filled = false;
        self.origin[..self.dimension].copy_from_slice(origin);

        let mut lattice = [0i64; MAX_DIMENSION];
        for node in 0..self.node_count() {
            let mut rest = node;
            for axis in 0..self.dimension {
                let offset = (rest % self.bounds) as i64;
                rest /= self.bounds;
                let coordinate = origin[axis] + offset;
                lattice[axis] = match periods[axis] {
                    Some(period) => wrap_index(coordinate, period),
                    None => coordinate,
                };
            }

            let vector = gradient(&lattice[..self.dimension])?;
            self.check_len(vector.len())?;
            let start = node * self.dimension;
            self.gradients[start..start + self.dimension].copy_from_slice(vector);
        }

        self.filled = true;
        Ok(())
    }

    /// Gradient stored at a per-dimension bound index.
    pub fn gradient(&self, index: &[usize]) -> Result<&[f64], ArgumentError> {
        self.check_len(index.len())?;
        let mut node = 0;
        let mut stride = 1;
        for &i in index {
            if i >= self.bounds {
                return Err(ArgumentError::BoundIndexOutOfRange {
                    index: i,
                    bounds: self.bounds,
                });
            }
            node += i * stride;
            stride *= self.bounds;
        }
        let start = node * self.dimension;
        Ok(&self.gradients[start..start + self.dimension])
    }

    /// Gradient noise at `offset`, measured in lattice units from the origin.
    ///
    /// Each component must lie in `[0, bounds - 1]`; the two nodes surrounding
    /// it along every axis are blended with the quintic fade. The result lies in
    /// `[-sqrt(D)/2, sqrt(D)/2]`.
    pub fn interpolate(&self, offset: &[f64]) -> Result<f64, ArgumentError> {
        self.check_len(offset.len())?;
        if self.bounds < 2 {
            return Err(ArgumentError::BoundsOutOfRange(self.bounds));
        }

        let mut cell = [0usize; MAX_DIMENSION];
        let mut local = [0.0f64; MAX_DIMENSION];
        let mut weight = [0.0f64; MAX_DIMENSION];
        let last_cell = (self.bounds - 2) as i64;
        for axis in 0..self.dimension {
            let k = floor(offset[axis]).clamp(0, last_cell);
            cell[axis] = k as usize;
            local[axis] = offset[axis] - k as f64;
            weight[axis] = fade(local[axis]);
        }

        let mut index = [0usize; MAX_DIMENSION];
        let mut total = 0.0;
        for corner in 0..(1usize << self.dimension) {
            let mut corner_weight = 1.0;
            for axis in 0..self.dimension {
                let upper = (corner >> axis) & 1;
                index[axis] = cell[axis] + upper;
                corner_weight *= if upper == 1 {
                    weight[axis]
                } else {
                    1.0 - weight[axis]
                };
            }
            let g = self.gradient(&index[..self.dimension])?;
            let mut dot = 0.0;
            for axis in 0..self.dimension {
                let upper = ((corner >> axis) & 1) as f64;
                dot += g[axis] * (local[axis] - upper);
            }
            total += corner_weight * dot;
        }
        Ok(total)
    }

    const fn check_len(&self, got: usize) -> Result<(), ArgumentError> {
        if got == self.dimension {
            Ok(())
        } else {
            Err(ArgumentError::DimensionMismatch {
                expected: self.dimension,
                got,
            })
        }
    }
}
