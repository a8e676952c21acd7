//! Dimension-typed result frames and the buffer that accumulates them.
//!
//! One octave step yields one [`Frame`]: a scalar for point noise, a row for
//! line noise, a plane for slice noise. A [`NoiseBuffer`] holds the frames of
//! one `next(count)` call and supports element-wise accumulation across octaves
//! followed by normalisation.

use std::fmt;
use std::slice;

use stratum_utils::ArgumentError;

/// Dense row-major 2D array.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Grid {
    /// A zero-filled grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    /// Wraps row-major values.
    pub fn from_values(
        width: usize,
        height: usize,
        values: Vec<f64>,
    ) -> Result<Self, ArgumentError> {
        if values.len() != width * height {
            return Err(ArgumentError::DimensionMismatch {
                expected: width * height,
                got: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Value at column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// One row.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.values[start..start + self.width])
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.width.max(1))
    }

    /// Row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the grid, returning its row-major values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// The output of one octave step.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Point noise.
    Scalar(f64),
    /// Line noise: one row of fixed width.
    Sequence(Vec<f64>),
    /// Slice noise: one plane of fixed width and height.
    Grid(Grid),
}

impl Frame {
    /// All values of the frame, row-major for grids.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Scalar(value) => slice::from_ref(value),
            Self::Sequence(values) => values,
            Self::Grid(grid) => grid.values(),
        }
    }

    fn values_mut(&mut self) -> &mut [f64] {
        match self {
            Self::Scalar(value) => slice::from_mut(value),
            Self::Sequence(values) => values,
            Self::Grid(grid) => &mut grid.values,
        }
    }

    /// Whether both frames have the same variant and extent.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(_), Self::Scalar(_)) => true,
            (Self::Sequence(a), Self::Sequence(b)) => a.len() == b.len(),
            (Self::Grid(a), Self::Grid(b)) => a.width == b.width && a.height == b.height,
            _ => false,
        }
    }

    /// Adds `other` element-wise.
    pub fn add(&mut self, other: &Self) -> Result<(), ArgumentError> {
        if !self.same_shape(other) {
            return Err(ArgumentError::ShapeMismatch {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        for (acc, value) in self.values_mut().iter_mut().zip(other.values()) {
            *acc += value;
        }
        Ok(())
    }

    /// Divides every value by `divisor`.
    pub fn normalize_by(&mut self, divisor: f64) {
        for value in self.values_mut() {
            *value /= divisor;
        }
    }

    /// The scalar, if this is a point frame.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// The row, if this is a line frame.
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<f64>> {
        match self {
            Self::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// The plane, if this is a slice frame.
    #[must_use]
    pub fn into_grid(self) -> Option<Grid> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(_) => write!(f, "scalar"),
            Self::Sequence(values) => write!(f, "sequence[{}]", values.len()),
            Self::Grid(grid) => write!(f, "grid[{}x{}]", grid.width, grid.height),
        }
    }
}

/// The frames produced by one `next(count)` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoiseBuffer {
    frames: Vec<Frame>,
}

impl NoiseBuffer {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the buffer holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frames in generation order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Adds another octave's frames element-wise.
    ///
    /// The order in which octaves are added only affects floating-point rounding.
    pub fn add(&mut self, frames: &[Frame]) -> Result<(), ArgumentError> {
        if frames.len() != self.frames.len() {
            return Err(ArgumentError::DimensionMismatch {
                expected: self.frames.len(),
                got: frames.len(),
            });
        }
        for (acc, frame) in self.frames.iter_mut().zip(frames) {
            acc.add(frame)?;
        }
        Ok(())
    }

    /// Divides every value of every frame by `divisor`.
    pub fn normalize_by(&mut self, divisor: f64) {
        for frame in &mut self.frames {
            frame.normalize_by(divisor);
        }
    }

    /// Consumes the buffer, returning its frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Consumes the buffer, concatenating the values of all frames.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values().collect()
    }

    /// Every value of every frame, in generation order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().flat_map(|frame| frame.values().iter().copied())
    }
}

impl From<Vec<Frame>> for NoiseBuffer {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}
