//! Validation error for the downsampling pipeline.

use std::fmt;

/// Error returned when a canvas cannot be downsampled without losing pixels.
///
/// The individual pipeline stages truncate silently; [`Downsampler`]
/// checks its inputs up front and reports the first violated requirement.
///
/// # Example
///
/// ```
/// use digit_downsample::{DownsampleError, Downsampler};
///
/// // 3 bytes is not even one RGBA pixel
/// let err = Downsampler::new(1).process(&[0, 0, 0], 1, 1).unwrap_err();
/// assert_eq!(err, DownsampleError::BufferLength { expected: 4, actual: 3 });
/// ```
///
/// [`Downsampler`]: crate::Downsampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownsampleError {
    /// Block size is zero
    ZeroBlockSize,
    /// Width or height is zero
    EmptyImage {
        /// Declared canvas width
        width: usize,
        /// Declared canvas height
        height: usize,
    },
    /// `width * height * 4` does not fit in `usize`
    DimensionsTooLarge {
        /// Declared canvas width
        width: usize,
        /// Declared canvas height
        height: usize,
    },
    /// Buffer length differs from `width * height * 4`
    BufferLength {
        /// Length implied by the declared dimensions
        expected: usize,
        /// Length of the buffer actually supplied
        actual: usize,
    },
    /// Block size does not evenly divide the canvas
    BlockSizeMismatch {
        /// Requested block size
        block_size: usize,
        /// Declared canvas width
        width: usize,
        /// Declared canvas height
        height: usize,
    },
}

impl fmt::Display for DownsampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownsampleError::ZeroBlockSize => write!(f, "block size must be at least 1"),
            DownsampleError::EmptyImage { width, height } => {
                write!(f, "canvas is empty ({}x{})", width, height)
            }
            DownsampleError::DimensionsTooLarge { width, height } => {
                write!(f, "canvas dimensions {}x{} are too large", width, height)
            }
            DownsampleError::BufferLength { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} bytes, expected {} (width * height * 4)",
                    actual, expected
                )
            }
            DownsampleError::BlockSizeMismatch {
                block_size,
                width,
                height,
            } => {
                write!(
                    f,
                    "block size {} does not evenly divide canvas {}x{}",
                    block_size, width, height
                )
            }
        }
    }
}

impl std::error::Error for DownsampleError {}
