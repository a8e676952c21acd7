//! Slice octaves: one plane of samples per step.

use stratum_utils::ArgumentError;

use super::{Octave, OctaveParams, Sampler};
use crate::error::NoiseError;
use crate::frame::{Frame, Grid};

/// Three-dimensional octave: a fixed `width x height` plane, advanced along z.
#[derive(Debug, Clone)]
pub struct SliceNoise {
    params: OctaveParams,
    width: usize,
    height: usize,
    z: f64,
    sampler: Sampler,
}

impl SliceNoise {
    pub(super) fn new(
        mut params: OctaveParams,
        width: usize,
        height: usize,
    ) -> Result<Self, NoiseError> {
        params.validate(Self::DIMENSION)?;
        if width == 0 {
            return Err(ArgumentError::EmptyExtent { name: "width" }.into());
        }
        if height == 0 {
            return Err(ArgumentError::EmptyExtent { name: "height" }.into());
        }
        let period_x = params.period(0, width)?;
        let period_y = params.period(1, height)?;
        let sampler = Sampler::new(params.seed(), vec![period_x, period_y, None])?;
        Ok(Self {
            params,
            width,
            height,
            z: 0.0,
            sampler,
        })
    }

    /// Columns per frame.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Rows per frame.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Amplitude-scaled noise at sample column `x`, sample row `y` and lattice
    /// depth `z`, without moving the cursor.
    pub fn value_at(&mut self, x: f64, y: f64, z: f64) -> Result<f64, NoiseError> {
        let steps = self.params.step_sizes();
        let position = [x * steps[0], y * steps[1], z];
        let value = self.sampler.sample(&position)?;
        Ok(value * self.params.amplitude())
    }
}

impl Octave for SliceNoise {
    const DIMENSION: usize = 3;

    fn params(&self) -> &OctaveParams {
        &self.params
    }

    fn next_frame(&mut self) -> Result<Frame, NoiseError> {
        self.z += self.params.step_sizes()[2];
        let z = self.z;
        let mut values = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                values.push(self.value_at(x as f64, y as f64, z)?);
            }
        }
        Ok(Frame::Grid(Grid::from_values(self.width, self.height, values)?))
    }
}

impl PartialEq for SliceNoise {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.width == other.width && self.height == other.height
    }
}
