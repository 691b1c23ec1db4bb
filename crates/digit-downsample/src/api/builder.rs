//! Downsampler builder -- the primary entry point for the crate.
//!
//! [`Downsampler`] runs the full pipeline behind input validation, so the
//! silent truncation of the individual stages never happens on its path.

use crate::api::DownsampleError;
use crate::output::{normalize, TensorInput, TensorShape};
use crate::preprocess::{block_averages, decompose, to_grayscale, DownsampledMatrix, PixelMatrix};

/// Validating front end for the downsampling pipeline.
///
/// # Design
///
/// - Holds only the block size and output shape; no state survives a call
/// - Configuration methods consume and return `self`
/// - [`process()`](Self::process) takes `&self` so one downsampler serves
///   any number of canvases
///
/// # Example
///
/// ```
/// use digit_downsample::{Downsampler, TensorShape};
///
/// // 56x56 white canvas, scale factor 2 -> 28x28 model input
/// let rgba = vec![255u8; 56 * 56 * 4];
/// let tensor = Downsampler::new(2).process(&rgba, 56, 56).unwrap();
///
/// assert_eq!(tensor.shape(), TensorShape::Image);
/// assert_eq!(tensor.dims(), vec![1, 28, 28, 1]);
/// assert!(tensor.values().iter().all(|&v| v == 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downsampler {
    block_size: usize,
    shape: TensorShape,
}

impl Downsampler {
    /// Create a downsampler averaging `block_size` x `block_size` tiles.
    ///
    /// The output shape defaults to [`TensorShape::Image`].
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            shape: TensorShape::default(),
        }
    }

    /// Set the output tensor layout.
    #[inline]
    pub fn shape(mut self, shape: TensorShape) -> Self {
        self.shape = shape;
        self
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn output_shape(&self) -> TensorShape {
        self.shape
    }

    /// Check that `rgba` is a complete `width` x `height` canvas that
    /// splits into whole blocks.
    ///
    /// Checks run in order: block size, empty canvas, overflow, buffer
    /// length, divisibility.
    pub fn validate(&self, rgba: &[u8], width: usize, height: usize) -> Result<(), DownsampleError> {
        if self.block_size == 0 {
            return Err(DownsampleError::ZeroBlockSize);
        }
        if width == 0 || height == 0 {
            return Err(DownsampleError::EmptyImage { width, height });
        }

        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(DownsampleError::DimensionsTooLarge { width, height })?;
        if rgba.len() != expected {
            return Err(DownsampleError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }

        if width % self.block_size != 0 || height % self.block_size != 0 {
            return Err(DownsampleError::BlockSizeMismatch {
                block_size: self.block_size,
                width,
                height,
            });
        }

        Ok(())
    }

    /// Grayscale, reshape, decompose and average.
    ///
    /// Returns a matrix of `width / block_size` columns by
    /// `height / block_size` rows with values in `[0, 255]`.
    pub fn downsample(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DownsampledMatrix, DownsampleError> {
        self.validate(rgba, width, height)?;

        let gray = to_grayscale(rgba);
        let pixels = PixelMatrix::from_vec(gray, width);
        let blocks = decompose(&pixels, self.block_size);
        Ok(block_averages(&blocks, width / self.block_size))
    }

    /// Run the whole pipeline, returning the normalized model input.
    pub fn process(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<TensorInput, DownsampleError> {
        let matrix = self.downsample(rgba, width, height)?;
        Ok(normalize(&matrix, self.shape))
    }
}
