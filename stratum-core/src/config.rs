//! JSON5 description of one generator.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::builder::NoiseBuilder;
use crate::error::ConfigError;
use crate::factor::Multiplier;
use crate::scheduler::Scheduler;

/// Octaves in the reference configuration.
pub const DEFAULT_LAYERS: usize = 9;
/// Values produced by the demo driver when no count is configured.
pub const DEFAULT_COUNT: usize = 75;

/// Which octave kind a generator layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// One value per step.
    #[default]
    Point,
    /// One row of `width` values per step.
    Line,
    /// One `width x height` plane per step.
    Slice,
}

/// A geometric factor sequence.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FactorConfig {
    /// First value.
    pub initial: f64,
    /// Multiplier between consecutive values.
    pub factor: f64,
}

impl FactorConfig {
    /// The sequence this describes.
    #[must_use]
    pub const fn sequence(&self) -> Multiplier {
        Multiplier::new(self.initial, self.factor)
    }
}

/// Generator configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Octave kind.
    pub kind: GeneratorKind,
    /// Octaves requested.
    pub layers: usize,
    /// Seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Samples per lattice cell of successive octaves.
    pub distance: FactorConfig,
    /// Amplitude of successive octaves.
    pub amplitude: FactorConfig,
    /// Whether fixed dimensions tile.
    pub circular: bool,
    /// Row length of line and slice generators.
    pub width: usize,
    /// Plane height of slice generators.
    pub height: usize,
    /// Size of a dedicated worker pool; the shared pool when absent.
    pub threads: Option<usize>,
    /// Frames to generate.
    pub count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Point,
            layers: DEFAULT_LAYERS,
            seed: None,
            distance: FactorConfig {
                initial: 2048.0,
                factor: 0.5,
            },
            amplitude: FactorConfig {
                initial: 1.0,
                factor: 1.0 / 1.8,
            },
            circular: false,
            width: 256,
            height: 256,
            threads: None,
            count: DEFAULT_COUNT,
        }
    }
}

impl GeneratorConfig {
    /// Reads a JSON5 config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json5::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        log::debug!("Loaded {:?} generator config from {}", config.kind, path.display());
        Ok(config)
    }

    /// A builder for this configuration.
    ///
    /// Without a configured seed every call draws a new random one; set
    /// [`seed`](Self::seed) first to get a reproducible builder.
    pub fn builder(&self) -> Result<NoiseBuilder, ConfigError> {
        let scheduler = match self.threads {
            Some(threads) => Scheduler::dedicated(threads)?,
            None => Scheduler::Shared,
        };
        Ok(NoiseBuilder::new()
            .layers(self.layers)
            .distance_factors(self.distance.sequence())
            .amplitude_factors(self.amplitude.sequence())
            .seed(self.seed.unwrap_or_else(rand::random))
            .circular(self.circular)
            .scheduler(scheduler))
    }
}
