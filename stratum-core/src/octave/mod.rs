//! Single-octave gradient noise generators.
//!
//! An octave owns its cursor and its interpolation window. Cloning an octave
//! deep-copies both, so two clones advance independently.

mod line;
mod point;
mod slice;

pub use line::LineNoise;
pub use point::PointNoise;
pub use slice::SliceNoise;

use std::fmt;

use stratum_utils::gradient::MAX_GRADIENT_DIMENSION;
use stratum_utils::math::{floor, to_unit_interval};
use stratum_utils::{ArgumentError, BoundGrid, GradientTables};

use crate::error::{NoiseError, ParameterError};
use crate::frame::Frame;

/// Most interpolation points a single lattice cell may span.
pub const MAX_INTERPOLATION_POINTS: usize = 1 << 24;

/// Largest magnitude of raw gradient noise in `dimension` dimensions.
#[inline]
#[must_use]
pub fn noise_bound(dimension: usize) -> f64 {
    (dimension as f64).sqrt() / 2.0
}

/// Samples per lattice cell for a step size, `round(1 / step)`.
#[inline]
#[must_use]
pub fn interpolation_points(step: f64) -> f64 {
    (1.0 / step).round()
}

/// One octave of gradient noise with a sequential cursor.
pub trait Octave: Clone + PartialEq + Send + fmt::Debug {
    /// Number of lattice dimensions, including the cursor axis.
    const DIMENSION: usize;

    /// Parameters the octave was built from.
    fn params(&self) -> &OctaveParams;

    /// Advances the cursor by one step and returns the frame at the new position.
    fn next_frame(&mut self) -> Result<Frame, NoiseError>;

    /// Advances `count` times.
    fn next_frames(&mut self, count: usize) -> Result<Vec<Frame>, NoiseError> {
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            frames.push(self.next_frame()?);
        }
        Ok(frames)
    }

    /// Amplitude the unit-range noise is scaled by.
    fn amplitude(&self) -> f64 {
        self.params().amplitude()
    }

    /// Seed of the lattice gradients.
    fn seed(&self) -> u64 {
        self.params().seed()
    }

    /// Whether every fixed dimension tiles seamlessly.
    fn is_circular(&self) -> bool {
        self.params().is_circular()
    }
}

/// Validated construction parameters shared by every octave kind.
///
/// Step sizes are ordered by axis: fixed dimensions first, the cursor axis
/// last. A point octave has one step, a line octave two, a slice octave three.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveParams {
    step_sizes: Vec<f64>,
    amplitude: f64,
    seed: u64,
    circular: bool,
}

impl OctaveParams {
    /// Parameters for a non-circular octave.
    #[must_use]
    pub fn new(step_sizes: impl Into<Vec<f64>>, amplitude: f64, seed: u64) -> Self {
        Self {
            step_sizes: step_sizes.into(),
            amplitude,
            seed,
            circular: false,
        }
    }

    /// Requests seamless wrapping along the fixed dimensions.
    #[must_use]
    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Step sizes by axis.
    #[must_use]
    pub fn step_sizes(&self) -> &[f64] {
        &self.step_sizes
    }

    /// Amplitude.
    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Gradient seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether wrapping was requested.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        self.circular
    }

    /// Checks the parameters for an octave of `dimension` axes.
    pub fn validate(&self, dimension: usize) -> Result<(), ParameterError> {
        if self.step_sizes.len() != dimension {
            return Err(ParameterError::StepCountMismatch {
                expected: dimension,
                got: self.step_sizes.len(),
            });
        }
        for (axis, &step) in self.step_sizes.iter().enumerate() {
            if !step.is_finite() {
                return Err(ParameterError::NonFiniteStepSize { axis, step });
            }
            if step == 0.0 {
                return Err(ParameterError::ZeroStepSize { axis });
            }
            if step < 0.0 {
                return Err(ParameterError::NegativeStepSize { axis, step });
            }
            let points = interpolation_points(step);
            if points > MAX_INTERPOLATION_POINTS as f64 {
                return Err(ParameterError::TooManyInterpolationPoints {
                    axis,
                    step,
                    points,
                    max: MAX_INTERPOLATION_POINTS,
                });
            }
        }
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 {
            return Err(ParameterError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }

    /// Builds a point octave. Circularity does not apply to points and is cleared.
    pub fn build_point(self) -> Result<PointNoise, NoiseError> {
        PointNoise::new(self)
    }

    /// Builds a line octave producing `width` samples per frame.
    pub fn build_line(self, width: usize) -> Result<LineNoise, NoiseError> {
        LineNoise::new(self, width)
    }

    /// Builds a slice octave producing `width x height` samples per frame.
    pub fn build_slice(self, width: usize, height: usize) -> Result<SliceNoise, NoiseError> {
        SliceNoise::new(self, width, height)
    }

    /// Lattice period of a fixed dimension of `length` samples, if it wraps.
    ///
    /// A wrapping axis has its step snapped to exactly `1 / points`, so sample
    /// `length` lands on the lattice node of sample `0`.
    fn period(&mut self, axis: usize, length: usize) -> Result<Option<i64>, ArgumentError> {
        if !self.circular {
            return Ok(None);
        }
        let points = interpolation_points(self.step_sizes[axis]) as usize;
        if points == 0 || length % points != 0 {
            return Err(ArgumentError::NotCircular { points, length });
        }
        self.step_sizes[axis] = 1.0 / points as f64;
        Ok(Some((length / points) as i64))
    }
}

/// Lattice sampler shared by the octave kinds: a gradient window plus the
/// wrapping periods of each axis.
#[derive(Debug, Clone, PartialEq)]
struct Sampler {
    seed: u64,
    periods: Vec<Option<i64>>,
    bound: f64,
    grid: BoundGrid,
}

impl Sampler {
    fn new(seed: u64, periods: Vec<Option<i64>>) -> Result<Self, ArgumentError> {
        let dimension = periods.len();
        if dimension > MAX_GRADIENT_DIMENSION {
            return Err(ArgumentError::DimensionOutOfRange(dimension));
        }
        Ok(Self {
            seed,
            bound: noise_bound(dimension),
            grid: BoundGrid::new(dimension, 2)?,
            periods,
        })
    }

    /// Noise in `[0, 1)` at a lattice-space position.
    fn sample(&mut self, position: &[f64]) -> Result<f64, ArgumentError> {
        let dimension = self.periods.len();
        if position.len() != dimension {
            return Err(ArgumentError::DimensionMismatch {
                expected: dimension,
                got: position.len(),
            });
        }

        let mut origin = [0i64; MAX_GRADIENT_DIMENSION];
        let mut offset = [0.0f64; MAX_GRADIENT_DIMENSION];
        for (axis, &p) in position.iter().enumerate() {
            let cell = floor(p);
            origin[axis] = cell;
            offset[axis] = p - cell as f64;
        }

        if !self.grid.covers(&origin[..dimension]) {
            let tables = GradientTables::global();
            let seed = self.seed;
            self.grid.fill(&origin[..dimension], &self.periods, |lattice| {
                tables.gradient(seed, lattice)
            })?;
        }

        let raw = self.grid.interpolate(&offset[..dimension])?;
        Ok(to_unit_interval(raw, self.bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_validation_distinguishes_causes() {
        let params = |step: f64| OctaveParams::new([step], 1.0, 0);
        assert_eq!(
            params(0.0).validate(1),
            Err(ParameterError::ZeroStepSize { axis: 0 })
        );
        assert_eq!(
            params(-0.25).validate(1),
            Err(ParameterError::NegativeStepSize {
                axis: 0,
                step: -0.25
            })
        );
        assert!(matches!(
            params(f64::NAN).validate(1),
            Err(ParameterError::NonFiniteStepSize { axis: 0, .. })
        ));
        assert!(matches!(
            params(1e-9).validate(1),
            Err(ParameterError::TooManyInterpolationPoints { axis: 0, .. })
        ));
        assert_eq!(params(1.0 / 64.0).validate(1), Ok(()));
    }

    #[test]
    fn test_amplitude_and_count_validation() {
        assert_eq!(
            OctaveParams::new([0.5], 0.0, 0).validate(1),
            Err(ParameterError::InvalidAmplitude(0.0))
        );
        assert_eq!(
            OctaveParams::new([0.5], 1.0, 0).validate(2),
            Err(ParameterError::StepCountMismatch {
                expected: 2,
                got: 1
            })
        );
        // The failing axis is reported.
        assert_eq!(
            OctaveParams::new([0.5, 0.0], 1.0, 0).validate(2),
            Err(ParameterError::ZeroStepSize { axis: 1 })
        );
    }

    #[test]
    fn test_period_requires_divisor() {
        let mut params = OctaveParams::new([1.0 / 8.0, 0.1], 1.0, 0).circular(true);
        assert_eq!(params.period(0, 64), Ok(Some(8)));
        assert_eq!(
            params.period(0, 60),
            Err(ArgumentError::NotCircular {
                points: 8,
                length: 60
            })
        );
        let mut params = params.circular(false);
        assert_eq!(params.period(0, 60), Ok(None));
    }

    #[test]
    fn test_sampler_stays_in_unit_interval() {
        for dimension in 1..=3 {
            let mut sampler = Sampler::new(42, vec![None; dimension]).expect("valid dimension");
            for i in 0..500 {
                let p = f64::from(i) * 0.173 - 40.0;
                let position = vec![p; dimension];
                let value = sampler.sample(&position).expect("matching dimension");
                assert!((0.0..1.0).contains(&value), "{dimension}D value {value}");
            }
        }
    }

    #[test]
    fn test_sampler_rejects_wrong_position_length() {
        let mut sampler = Sampler::new(1, vec![None, None]).expect("valid dimension");
        assert_eq!(
            sampler.sample(&[0.5]),
            Err(ArgumentError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            Sampler::new(1, vec![None; 4]).unwrap_err(),
            ArgumentError::DimensionOutOfRange(4)
        );
    }
}
