//! Layered gradient noise.
//!
//! A [`NoiseBuilder`] turns a pair of factor sequences into a set of octaves
//! and wraps them in a [`LayeredNoise`] generator. Each call to
//! [`LayeredNoise::next`] samples every octave in parallel, sums the results
//! and normalises them into `[0, 1)`.
//!
//! ```no_run
//! use stratum_core::{Multiplier, NoiseBuilder};
//!
//! let mut noise = NoiseBuilder::new()
//!     .layers(9)
//!     .distance_factors(Multiplier::new(2048.0, 0.5))
//!     .amplitude_factors(Multiplier::new(1.0, 1.0 / 1.8))
//!     .seed(7)
//!     .build_point()?;
//! let values = noise.next_values(75)?;
//! assert_eq!(values.len(), 75);
//! # Ok::<(), stratum_core::NoiseError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod factor;
pub mod frame;
pub mod jitter;
pub mod layered;
pub mod octave;
pub mod scheduler;

pub use builder::NoiseBuilder;
pub use config::{FactorConfig, GeneratorConfig, GeneratorKind};
pub use error::{ConfigError, NoiseError, ParameterError};
pub use factor::{FactorFan, FactorList, FactorSequence, Multiplier};
pub use frame::{Frame, Grid, NoiseBuffer};
pub use jitter::{Jitter, NoJitter, RandomDelay};
pub use layered::LayeredNoise;
pub use octave::{LineNoise, Octave, OctaveParams, PointNoise, SliceNoise};
pub use scheduler::Scheduler;
pub use stratum_utils::ArgumentError;
