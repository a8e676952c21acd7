//! Resettable factor sequences that parameterise octave decay.
//!
//! A layered builder pulls one distance factor and one amplitude factor per
//! octave. Sequences are infinite and deterministic: after [`reset`] they
//! replay exactly the values they produced before.
//!
//! [`reset`]: FactorSequence::reset

use std::fmt;

/// A deterministic, resettable, infinite sequence of per-octave factors.
pub trait FactorSequence: Send + Sync + fmt::Debug {
    /// Produces the next factor.
    fn next_factor(&mut self) -> f64;

    /// Rewinds to the first value. Idempotent.
    fn reset(&mut self);

    /// A new sequence with the same parameters, positioned at its first value.
    ///
    /// Copies never share cursor state with the original.
    fn fresh_copy(&self) -> Box<dyn FactorSequence>;
}

/// Geometric sequence: `initial`, then each value is the previous one times `factor`.
///
/// The multiplication compounds on the previous output rather than computing
/// `initial * factor^n`, so rounding accumulates exactly the same way on
/// every replay.
#[derive(Debug, Clone)]
pub struct Multiplier {
    initial: f64,
    factor: f64,
    previous: f64,
    first: bool,
}

impl Multiplier {
    /// Creates a sequence starting at `initial`.
    #[must_use]
    pub const fn new(initial: f64, factor: f64) -> Self {
        Self {
            initial,
            factor,
            previous: initial,
            first: true,
        }
    }

    /// The first value of the sequence.
    #[must_use]
    pub const fn initial(&self) -> f64 {
        self.initial
    }

    /// The multiplier applied between consecutive values.
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }
}

impl FactorSequence for Multiplier {
    fn next_factor(&mut self) -> f64 {
        if self.first {
            self.first = false;
            self.previous = self.initial;
        } else {
            self.previous *= self.factor;
        }
        self.previous
    }

    fn reset(&mut self) {
        self.first = true;
        self.previous = self.initial;
    }

    fn fresh_copy(&self) -> Box<dyn FactorSequence> {
        Box::new(Self::new(self.initial, self.factor))
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        self.initial == other.initial && self.factor == other.factor
    }
}

impl Iterator for Multiplier {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_factor())
    }
}

/// An explicit list of factors, yielding `0.0` once exhausted.
///
/// A layered builder treats `0.0` as the end of usable octaves, so a list of
/// `n` positive values caps the octave count at `n`.
#[derive(Debug, Clone)]
pub struct FactorList {
    values: Vec<f64>,
    cursor: usize,
}

impl FactorList {
    /// Creates a list sequence.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl FactorSequence for FactorList {
    fn next_factor(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor = self.cursor.saturating_add(1);
        value
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn fresh_copy(&self) -> Box<dyn FactorSequence> {
        Box::new(Self::new(self.values.clone()))
    }
}

impl PartialEq for FactorList {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

/// One factor sequence per dimension, advanced together.
#[derive(Debug)]
pub struct FactorFan {
    sequences: Vec<Box<dyn FactorSequence>>,
}

impl FactorFan {
    /// Replicates one sequence `dimension` times; every replica owns its own cursor.
    #[must_use]
    pub fn replicate(sequence: &dyn FactorSequence, dimension: usize) -> Self {
        Self {
            sequences: (0..dimension).map(|_| sequence.fresh_copy()).collect(),
        }
    }

    /// Uses a distinct sequence per dimension.
    #[must_use]
    pub const fn from_sequences(sequences: Vec<Box<dyn FactorSequence>>) -> Self {
        Self { sequences }
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.sequences.len()
    }

    /// Next factor of every dimension.
    pub fn next_factors(&mut self) -> Vec<f64> {
        self.sequences.iter_mut().map(|s| s.next_factor()).collect()
    }

    /// Rewinds every dimension.
    pub fn reset(&mut self) {
        for sequence in &mut self.sequences {
            sequence.reset();
        }
    }

    /// Fresh copies of every dimension's sequence.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        Self {
            sequences: self.sequences.iter().map(|s| s.fresh_copy()).collect(),
        }
    }
}
