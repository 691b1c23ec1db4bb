//! Normalized model input.

use crate::preprocess::DownsampledMatrix;
use std::fmt;
use std::str::FromStr;

/// Layout the classifier expects its input in.
///
/// Both layouts hold the same values in the same row-major order; they only
/// differ in the dimensions reported by [`TensorInput::dims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TensorShape {
    /// Rank 4: `[batch, height, width, channel]` = `[1, rows, cols, 1]`
    #[default]
    Image,
    /// Rank 2: `[batch, features]` = `[1, rows * cols]`
    Flat,
}

impl TensorShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TensorShape::Image => "image",
            TensorShape::Flat => "flat",
        }
    }

    /// Tensor rank for this layout.
    pub fn rank(&self) -> usize {
        match self {
            TensorShape::Image => 4,
            TensorShape::Flat => 2,
        }
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a shape name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShapeError(pub String);

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tensor shape '{}' (expected 'image' or 'flat')",
            self.0
        )
    }
}

impl std::error::Error for ParseShapeError {}

impl FromStr for TensorShape {
    type Err = ParseShapeError;

    /// Accepts `image` / `rank4` / `4d` and `flat` / `rank2` / `2d`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if ["image", "rank4", "4d"]
            .iter()
            .any(|name| trimmed.eq_ignore_ascii_case(name))
        {
            Ok(TensorShape::Image)
        } else if ["flat", "rank2", "2d"]
            .iter()
            .any(|name| trimmed.eq_ignore_ascii_case(name))
        {
            Ok(TensorShape::Flat)
        } else {
            Err(ParseShapeError(s.to_string()))
        }
    }
}

/// Downsampled canvas rescaled to `[0, 1]`, ready to feed a classifier.
///
/// # Example
///
/// ```
/// use digit_downsample::{normalize, Matrix, TensorShape};
///
/// let m = Matrix::from_vec(vec![0.0f32, 51.0, 255.0, 127.5], 2);
/// let tensor = normalize(&m, TensorShape::Image);
///
/// assert_eq!(tensor.dims(), vec![1, 2, 2, 1]);
/// assert_eq!(tensor.values(), &[0.0, 0.2, 1.0, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TensorInput {
    shape: TensorShape,
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl TensorInput {
    #[inline]
    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Height of the downsampled image.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the downsampled image.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Normalized values, row-major.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Full tensor dimensions including the batch axis.
    pub fn dims(&self) -> Vec<usize> {
        match self.shape {
            TensorShape::Image => vec![1, self.rows, self.cols, 1],
            TensorShape::Flat => vec![1, self.rows * self.cols],
        }
    }

    /// Same values in the other layout.
    pub fn reshape(self, shape: TensorShape) -> Self {
        Self { shape, ..self }
    }
}

/// Divide every value of `matrix` by 255 and shape the result.
///
/// Values of a matrix produced from 8-bit pixels land in `[0, 1]`.
pub fn normalize(matrix: &DownsampledMatrix, shape: TensorShape) -> TensorInput {
    TensorInput {
        shape,
        rows: matrix.height(),
        cols: matrix.width(),
        values: matrix.data().iter().map(|&v| v / 255.0).collect(),
    }
}
