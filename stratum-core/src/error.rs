//! Error types for building and sampling layered noise.

use std::any::Any;
use std::error::Error as StdError;
use std::io;

use stratum_utils::ArgumentError;
use thiserror::Error;

/// Failure raised inside an octave task.
pub type TaskFailure = Box<dyn StdError + Send + Sync>;

/// An octave parameter rejected at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A step size of exactly zero.
    #[error("Step size of dimension {axis} is zero")]
    ZeroStepSize {
        /// Dimension of the step size.
        axis: usize,
    },
    /// A negative step size.
    #[error("Step size of dimension {axis} is negative: {step}")]
    NegativeStepSize {
        /// Dimension of the step size.
        axis: usize,
        /// The rejected value.
        step: f64,
    },
    /// A NaN or infinite step size.
    #[error("Step size of dimension {axis} is not finite: {step}")]
    NonFiniteStepSize {
        /// Dimension of the step size.
        axis: usize,
        /// The rejected value.
        step: f64,
    },
    /// An amplitude that is not a positive finite number.
    #[error("Amplitude must be positive and finite, got {0}")]
    InvalidAmplitude(f64),
    /// A step so small that a lattice cell spans too many samples.
    #[error(
        "Step size {step} of dimension {axis} needs {points} interpolation points, more than the maximum of {max}"
    )]
    TooManyInterpolationPoints {
        /// Dimension of the step size.
        axis: usize,
        /// The rejected value.
        step: f64,
        /// Interpolation points the step would need.
        points: f64,
        /// The ceiling.
        max: usize,
    },
    /// Wrong number of step sizes for the octave kind.
    #[error("Expected {expected} step sizes, got {got}")]
    StepCountMismatch {
        /// Dimension of the octave kind.
        expected: usize,
        /// Step sizes supplied.
        got: usize,
    },
}

/// A builder or configuration precondition that was not met.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Zero layers were requested.
    #[error("At least one layer must be requested")]
    NoLayersRequested,
    /// A factor sequence was never set.
    #[error("No {0} factor sequence was set")]
    MissingFactors(&'static str),
    /// Every requested layer was skipped.
    #[error("None of the {requested} requested layers could be built")]
    NoLayersBuilt {
        /// Layers requested.
        requested: usize,
    },
    /// A per-dimension factor set does not match the octave kind.
    #[error("Expected {expected} distance factor sequences, got {got}")]
    FactorDimensionMismatch {
        /// Dimension of the octave kind.
        expected: usize,
        /// Sequences supplied.
        got: usize,
    },
    /// The dedicated worker pool failed to start.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// A config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A config file could not be parsed.
    #[error("Failed to parse config {path}: {message}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        message: String,
    },
}

/// Error returned by builders and layered generators.
#[derive(Error, Debug)]
pub enum NoiseError {
    /// A structurally invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    /// An invalid octave parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
    /// An unmet builder precondition.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// An octave task failed; the whole call is aborted.
    #[error("Layer {layer} failed: {source}")]
    LayerProcessing {
        /// Index of the failing layer.
        layer: usize,
        /// What went wrong inside the task.
        #[source]
        source: TaskFailure,
    },
}

/// A panic caught at an octave task boundary.
#[derive(Error, Debug)]
#[error("Layer task panicked: {0}")]
pub struct LayerPanic(pub String);

impl LayerPanic {
    /// Extracts the message of a caught panic payload.
    #[must_use]
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&str>() {
            Self((*message).to_string())
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self(message.clone())
        } else {
            Self("unknown panic payload".to_string())
        }
    }
}
