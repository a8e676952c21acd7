//! The layered generator: many octaves summed into one normalised signal.
//!
//! Each `next(count)` call runs one task per octave on the generator's
//! [`Scheduler`]. Octaves are independent, but each one's cursor is strictly
//! sequential, so octaves are the only axis of parallelism. The call blocks
//! until every task finished; a failure in any of them fails the whole call and
//! no partial buffer is returned.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use stratum_utils::ArgumentError;

use crate::error::{ConfigError, LayerPanic, NoiseError, TaskFailure};
use crate::frame::{Frame, Grid, NoiseBuffer};
use crate::jitter::{Jitter, NoJitter};
use crate::octave::{LineNoise, Octave, PointNoise, SliceNoise};
use crate::scheduler::Scheduler;

/// A set of octaves sampled together.
///
/// Not safe for overlapping `next` calls on the same instance; `&mut self`
/// enforces that. Distinct instances are fully independent, even when they
/// share a dedicated pool.
#[derive(Debug, Clone)]
pub struct LayeredNoise<O: Octave> {
    octaves: Vec<O>,
    max_amplitude: f64,
    circular: bool,
    scheduler: Scheduler,
    jitter: Arc<dyn Jitter>,
}

impl<O: Octave> LayeredNoise<O> {
    /// Layers `octaves` on the shared pool without jitter.
    pub fn new(octaves: Vec<O>) -> Result<Self, NoiseError> {
        Self::with_scheduling(octaves, Scheduler::default(), Arc::new(NoJitter))
    }

    /// Layers `octaves` on an explicit scheduler and jitter strategy.
    pub fn with_scheduling(
        octaves: Vec<O>,
        scheduler: Scheduler,
        jitter: Arc<dyn Jitter>,
    ) -> Result<Self, NoiseError> {
        if octaves.is_empty() {
            return Err(ConfigError::NoLayersBuilt { requested: 0 }.into());
        }
        let max_amplitude = octaves.iter().map(Octave::amplitude).sum();
        // One octave that cannot tile breaks the seam for the sum.
        let circular = octaves.iter().all(Octave::is_circular);
        Ok(Self {
            octaves,
            max_amplitude,
            circular,
            scheduler,
            jitter,
        })
    }

    /// Sum of every octave's amplitude; the normalisation divisor.
    #[must_use]
    pub const fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    /// Number of octaves.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.octaves.len()
    }

    /// Whether every octave tiles seamlessly.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        self.circular
    }

    /// The octaves, lowest frequency first.
    #[must_use]
    pub fn octaves(&self) -> &[O] {
        &self.octaves
    }

    /// The scheduler octave tasks run on.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Produces the next `count` frames, summed over octaves and divided by
    /// [`max_amplitude`](Self::max_amplitude).
    #[tracing::instrument(level = "trace", skip(self), fields(layers = self.octaves.len()))]
    pub fn next(&mut self, count: usize) -> Result<NoiseBuffer, NoiseError> {
        if count == 0 {
            return Err(ArgumentError::NonPositiveCount.into());
        }

        let jitter = &*self.jitter;
        let octaves = &mut self.octaves;
        let results: Vec<Result<Vec<Frame>, TaskFailure>> = self.scheduler.install(|| {
            octaves
                .par_iter_mut()
                .enumerate()
                .map(|(layer, octave)| run_layer(layer, octave, count, jitter))
                .collect()
        });

        let mut layers = Vec::with_capacity(results.len());
        for (layer, result) in results.into_iter().enumerate() {
            layers.push(result.map_err(|source| NoiseError::LayerProcessing { layer, source })?);
        }

        // Summing in layer order keeps the output independent of which task
        // finished first.
        let mut layers = layers.into_iter();
        let mut buffer = NoiseBuffer::from(layers.next().unwrap_or_default());
        for frames in layers {
            buffer.add(&frames)?;
        }
        buffer.normalize_by(self.max_amplitude);
        Ok(buffer)
    }
}

fn run_layer<O: Octave>(
    layer: usize,
    octave: &mut O,
    count: usize,
    jitter: &dyn Jitter,
) -> Result<Vec<Frame>, TaskFailure> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Vec<Frame>, TaskFailure> {
        jitter.before_layer(layer)?;
        Ok(octave.next_frames(count)?)
    }));
    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let panic = LayerPanic::from_payload(&*payload);
            log::error!("Layer {layer} panicked: {}", panic.0);
            Err(Box::new(panic))
        }
    }
}

impl LayeredNoise<PointNoise> {
    /// Next single value.
    pub fn next_value(&mut self) -> Result<f64, NoiseError> {
        Ok(self.next_values(1)?[0])
    }

    /// Next `count` values.
    pub fn next_values(&mut self, count: usize) -> Result<Vec<f64>, NoiseError> {
        Ok(self.next(count)?.into_values())
    }
}

impl LayeredNoise<LineNoise> {
    /// Samples per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.octaves.first().map_or(0, LineNoise::width)
    }

    /// Next row.
    pub fn next_line(&mut self) -> Result<Vec<f64>, NoiseError> {
        Ok(self.next_lines(1)?.swap_remove(0))
    }

    /// Next `count` rows.
    pub fn next_lines(&mut self, count: usize) -> Result<Vec<Vec<f64>>, NoiseError> {
        Ok(self
            .next(count)?
            .into_frames()
            .into_iter()
            .filter_map(Frame::into_sequence)
            .collect())
    }
}

impl LayeredNoise<SliceNoise> {
    /// Columns per plane.
    #[must_use]
    pub fn width(&self) -> usize {
        self.octaves.first().map_or(0, SliceNoise::width)
    }

    /// Rows per plane.
    #[must_use]
    pub fn height(&self) -> usize {
        self.octaves.first().map_or(0, SliceNoise::height)
    }

    /// Next plane.
    pub fn next_slice(&mut self) -> Result<Grid, NoiseError> {
        Ok(self.next_slices(1)?.swap_remove(0))
    }

    /// Next `count` planes.
    pub fn next_slices(&mut self, count: usize) -> Result<Vec<Grid>, NoiseError> {
        Ok(self
            .next(count)?
            .into_frames()
            .into_iter()
            .filter_map(Frame::into_grid)
            .collect())
    }
}
