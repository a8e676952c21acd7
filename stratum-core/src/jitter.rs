//! Scheduling perturbation injected into octave tasks.
//!
//! A [`Jitter`] runs at the start of every octave task. Production generators
//! use [`NoJitter`]; tests pass [`RandomDelay`] or their own strategy to shake
//! out interleavings, or a failing one to exercise error propagation. The
//! strategy is owned by the generator it was built into, never global.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::error::TaskFailure;

/// Hook called before an octave task computes its values.
pub trait Jitter: Send + Sync + fmt::Debug {
    /// Runs before layer `layer` samples. An error aborts the whole call.
    fn before_layer(&self, layer: usize) -> Result<(), TaskFailure>;
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn before_layer(&self, _layer: usize) -> Result<(), TaskFailure> {
        Ok(())
    }
}

/// Sleeps for a random duration up to `max` before every layer.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    max: Duration,
}

impl RandomDelay {
    /// Creates a delay strategy.
    #[must_use]
    pub const fn new(max: Duration) -> Self {
        Self { max }
    }

    /// Longest delay.
    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }
}

impl Jitter for RandomDelay {
    fn before_layer(&self, _layer: usize) -> Result<(), TaskFailure> {
        let micros = u64::try_from(self.max.as_micros()).unwrap_or(u64::MAX);
        if micros == 0 {
            return Ok(());
        }
        let delay = rand::random::<u64>() % micros.saturating_add(1);
        thread::sleep(Duration::from_micros(delay));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_delay_is_bounded() {
        let jitter = RandomDelay::new(Duration::from_millis(2));
        let start = Instant::now();
        for layer in 0..10 {
            jitter.before_layer(layer).expect("delay never fails");
        }
        // Ten sleeps of at most 2ms each, with generous scheduler slack.
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        RandomDelay::new(Duration::ZERO)
            .before_layer(0)
            .expect("delay never fails");
        NoJitter.before_layer(0).expect("no-op");
    }
}
