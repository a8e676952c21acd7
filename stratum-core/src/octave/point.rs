//! Point octaves: one scalar per step.

use super::{Octave, OctaveParams, Sampler};
use crate::error::NoiseError;
use crate::frame::Frame;

/// One-dimensional octave: a single value per step along x.
#[derive(Debug, Clone)]
pub struct PointNoise {
    params: OctaveParams,
    position: f64,
    sampler: Sampler,
}

impl PointNoise {
    pub(super) fn new(params: OctaveParams) -> Result<Self, NoiseError> {
        let params = params.circular(false);
        params.validate(Self::DIMENSION)?;
        let sampler = Sampler::new(params.seed(), vec![None])?;
        Ok(Self {
            params,
            position: 0.0,
            sampler,
        })
    }

    /// Current cursor position in lattice units.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }
}

impl Octave for PointNoise {
    const DIMENSION: usize = 1;

    fn params(&self) -> &OctaveParams {
        &self.params
    }

    fn next_frame(&mut self) -> Result<Frame, NoiseError> {
        self.position += self.params.step_sizes()[0];
        let value = self.sampler.sample(&[self.position])?;
        Ok(Frame::Scalar(value * self.params.amplitude()))
    }
}

impl PartialEq for PointNoise {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}
