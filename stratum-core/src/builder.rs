//! One configuration struct, one `build_*` entry point per generator kind.
//!
//! For every octave the builder pulls the next distance factor (samples per
//! lattice cell, per axis) and the next amplitude factor, derives a seed, and
//! builds the octave. A distance or amplitude that is not a positive finite
//! number ends the octave list early; the generator keeps the octaves built so
//! far, provided there is at least one.

use std::sync::Arc;

use stratum_utils::random::Random;
use stratum_utils::random::xoroshiro::Xoroshiro;
use stratum_utils::{ArgumentError, GradientTables, correct_interpolation_points_for_circularity};

use crate::error::{ConfigError, NoiseError};
use crate::factor::{FactorFan, FactorSequence};
use crate::jitter::{Jitter, NoJitter};
use crate::layered::LayeredNoise;
use crate::octave::{LineNoise, Octave, OctaveParams, PointNoise, SliceNoise};
use crate::scheduler::Scheduler;

#[derive(Debug)]
enum DistanceFactors {
    Single(Box<dyn FactorSequence>),
    PerAxis(FactorFan),
}

/// Configuration of a layered generator.
///
/// Building never consumes the configured factor sequences: every build works
/// on fresh copies, so the same builder always produces the same generator.
#[derive(Debug)]
pub struct NoiseBuilder {
    layers: usize,
    distance: Option<DistanceFactors>,
    amplitude: Option<Box<dyn FactorSequence>>,
    seed: u64,
    circular: bool,
    scheduler: Scheduler,
    jitter: Arc<dyn Jitter>,
}

impl Default for NoiseBuilder {
    fn default() -> Self {
        Self {
            layers: 0,
            distance: None,
            amplitude: None,
            seed: 0,
            circular: false,
            scheduler: Scheduler::default(),
            jitter: Arc::new(NoJitter),
        }
    }
}

impl NoiseBuilder {
    /// An empty configuration. Layers and both factor sequences must be set before building.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of octaves to build.
    #[must_use]
    pub const fn layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// One distance sequence, replicated independently for every axis.
    #[must_use]
    pub fn distance_factors(mut self, sequence: impl FactorSequence + 'static) -> Self {
        self.distance = Some(DistanceFactors::Single(Box::new(sequence)));
        self
    }

    /// A distinct distance sequence per axis, fixed axes first and the cursor axis last.
    #[must_use]
    pub fn distance_factors_per_axis(mut self, fan: FactorFan) -> Self {
        self.distance = Some(DistanceFactors::PerAxis(fan));
        self
    }

    /// Amplitude sequence.
    #[must_use]
    pub fn amplitude_factors(mut self, sequence: impl FactorSequence + 'static) -> Self {
        self.amplitude = Some(Box::new(sequence));
        self
    }

    /// Seed from which every octave seed is derived.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Snaps fixed-axis distances so the output tiles. Ignored by point generators.
    #[must_use]
    pub const fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Pool the octave tasks run on.
    #[must_use]
    pub fn scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Hook run at the start of every octave task.
    #[must_use]
    pub fn jitter(mut self, jitter: Arc<dyn Jitter>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Builds a point generator.
    pub fn build_point(&self) -> Result<LayeredNoise<PointNoise>, NoiseError> {
        self.build_layers(&[], OctaveParams::build_point)
    }

    /// Builds a line generator with rows of `width` samples.
    pub fn build_line(&self, width: usize) -> Result<LayeredNoise<LineNoise>, NoiseError> {
        self.build_layers(&[("width", width)], |params| params.build_line(width))
    }

    /// Builds a slice generator with `width x height` planes.
    pub fn build_slice(
        &self,
        width: usize,
        height: usize,
    ) -> Result<LayeredNoise<SliceNoise>, NoiseError> {
        self.build_layers(&[("width", width), ("height", height)], |params| {
            params.build_slice(width, height)
        })
    }

    fn build_layers<O, F>(
        &self,
        fixed: &[(&'static str, usize)],
        make: F,
    ) -> Result<LayeredNoise<O>, NoiseError>
    where
        O: Octave,
        F: Fn(OctaveParams) -> Result<O, NoiseError>,
    {
        if self.layers == 0 {
            return Err(ConfigError::NoLayersRequested.into());
        }
        if let Some(&(name, _)) = fixed.iter().find(|(_, length)| *length == 0) {
            return Err(ArgumentError::EmptyExtent { name }.into());
        }

        let dimension = O::DIMENSION;
        let mut distances = match &self.distance {
            None => return Err(ConfigError::MissingFactors("distance").into()),
            Some(DistanceFactors::Single(sequence)) => {
                FactorFan::replicate(&**sequence, dimension)
            }
            Some(DistanceFactors::PerAxis(fan)) => {
                if fan.dimension() != dimension {
                    return Err(ConfigError::FactorDimensionMismatch {
                        expected: dimension,
                        got: fan.dimension(),
                    }
                    .into());
                }
                fan.fresh_copy()
            }
        };
        let mut amplitudes = self
            .amplitude
            .as_ref()
            .ok_or(ConfigError::MissingFactors("amplitude"))?
            .fresh_copy();

        // Octaves sample the tables from worker threads; make sure they exist first.
        let _ = GradientTables::global();

        let mut seeds = Xoroshiro::from_seed(self.seed);
        let mut octaves = Vec::with_capacity(self.layers);
        for layer in 0..self.layers {
            let distance = distances.next_factors();
            let amplitude = amplitudes.next_factor();
            if !distance.iter().all(|&d| usable(d)) || !usable(amplitude) {
                log::warn!(
                    "Layer {layer} has distance {distance:?} and amplitude {amplitude}; \
                     stopping with {} of {} layers built, {} skipped",
                    octaves.len(),
                    self.layers,
                    self.layers - octaves.len()
                );
                break;
            }

            let mut steps = Vec::with_capacity(dimension);
            for (axis, &d) in distance.iter().enumerate() {
                let d = match fixed.get(axis) {
                    Some(&(_, length)) if self.circular => {
                        // Below half a sample per cell still means one point per cell.
                        let requested = (d.round() as usize).max(1);
                        correct_interpolation_points_for_circularity(requested, length)? as f64
                    }
                    _ => d,
                };
                steps.push(1.0 / d);
            }

            let params =
                OctaveParams::new(steps, amplitude, seeds.next_u64()).circular(self.circular);
            octaves.push(make(params)?);
        }

        if octaves.is_empty() {
            return Err(ConfigError::NoLayersBuilt {
                requested: self.layers,
            }
            .into());
        }
        log::debug!(
            "Built {} of {} layers ({}D, circular: {})",
            octaves.len(),
            self.layers,
            dimension,
            self.circular
        );
        LayeredNoise::with_scheduling(octaves, self.scheduler.clone(), Arc::clone(&self.jitter))
    }
}

fn usable(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}
