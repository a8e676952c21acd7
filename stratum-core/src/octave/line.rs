//! Line octaves: one row of samples per step.

use stratum_utils::ArgumentError;

use super::{Octave, OctaveParams, Sampler};
use crate::error::NoiseError;
use crate::frame::Frame;

/// Two-dimensional octave: a fixed-width row along x, advanced along y.
///
/// With circularity, sample `width` lands on the lattice node of sample `0`,
/// so the row tiles seamlessly.
#[derive(Debug, Clone)]
pub struct LineNoise {
    params: OctaveParams,
    width: usize,
    y: f64,
    sampler: Sampler,
}

impl LineNoise {
    pub(super) fn new(mut params: OctaveParams, width: usize) -> Result<Self, NoiseError> {
        params.validate(Self::DIMENSION)?;
        if width == 0 {
            return Err(ArgumentError::EmptyExtent { name: "width" }.into());
        }
        let period_x = params.period(0, width)?;
        let sampler = Sampler::new(params.seed(), vec![period_x, None])?;
        Ok(Self {
            params,
            width,
            y: 0.0,
            sampler,
        })
    }

    /// Samples per frame.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Amplitude-scaled noise at sample column `x` and lattice row `y`,
    /// without moving the cursor.
    pub fn value_at(&mut self, x: f64, y: f64) -> Result<f64, NoiseError> {
        let step_x = self.params.step_sizes()[0];
        let value = self.sampler.sample(&[x * step_x, y])?;
        Ok(value * self.params.amplitude())
    }
}

impl Octave for LineNoise {
    const DIMENSION: usize = 2;

    fn params(&self) -> &OctaveParams {
        &self.params
    }

    fn next_frame(&mut self) -> Result<Frame, NoiseError> {
        self.y += self.params.step_sizes()[1];
        let y = self.y;
        let mut row = Vec::with_capacity(self.width);
        for x in 0..self.width {
            row.push(self.value_at(x as f64, y)?);
        }
        Ok(Frame::Sequence(row))
    }
}

impl PartialEq for LineNoise {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.width == other.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_have_width() {
        let mut octave = OctaveParams::new([1.0 / 8.0, 1.0 / 4.0], 1.0, 1)
            .build_line(37)
            .expect("valid octave");
        for frame in octave.next_frames(5).expect("sampling succeeds") {
            let row = frame.into_sequence().expect("line frame");
            assert_eq!(row.len(), 37);
            assert!(row.iter().all(|v| (0.0..1.0).contains(v)));
        }
    }

    #[test]
    fn test_seam_matches_start() {
        let mut octave = OctaveParams::new([1.0 / 8.0, 1.0 / 4.0], 1.0, 12)
            .circular(true)
            .build_line(64)
            .expect("8 divides 64");
        assert!(octave.is_circular());
        for row in 0..20 {
            let y = f64::from(row) * 0.3;
            let start = octave.value_at(0.0, y).expect("in range");
            let seam = octave.value_at(64.0, y).expect("in range");
            assert!((start - seam).abs() < 1e-12, "row {row}: {start} vs {seam}");
        }
    }

    #[test]
    fn test_circular_step_snapped_to_lattice() {
        let mut octave = OctaveParams::new([0.13, 0.25], 1.0, 12)
            .circular(true)
            .build_line(64)
            .expect("round(1 / 0.13) = 8 divides 64");
        assert_eq!(octave.params().step_sizes()[0].to_bits(), 0.125f64.to_bits());
        for row in 0..20 {
            let y = f64::from(row) * 0.3;
            let start = octave.value_at(0.0, y).expect("in range");
            let seam = octave.value_at(64.0, y).expect("in range");
            assert!((start - seam).abs() < 1e-12, "row {row}: {start} vs {seam}");
        }
    }

    #[test]
    fn test_non_circular_step_kept() {
        let octave = OctaveParams::new([0.13, 0.25], 1.0, 12)
            .build_line(64)
            .expect("valid octave");
        assert_eq!(octave.params().step_sizes()[0].to_bits(), 0.13f64.to_bits());
    }

    #[test]
    fn test_incompatible_width_rejected() {
        let err = OctaveParams::new([1.0 / 8.0, 0.25], 1.0, 0)
            .circular(true)
            .build_line(60)
            .unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidArgument(ArgumentError::NotCircular {
                points: 8,
                length: 60
            })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = OctaveParams::new([0.5, 0.5], 1.0, 0)
            .build_line(0)
            .unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidArgument(ArgumentError::EmptyExtent { name: "width" })
        ));
    }

    #[test]
    fn test_equality_includes_circularity() {
        let params = OctaveParams::new([0.125, 0.25], 1.0, 4);
        let plain = params.clone().build_line(16).expect("valid octave");
        let wrapped = params.circular(true).build_line(16).expect("valid octave");
        assert_ne!(plain, wrapped);
    }
}
