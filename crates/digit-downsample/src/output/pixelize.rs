//! Expand a downsampled matrix back to canvas resolution.

use crate::preprocess::DownsampledMatrix;

/// Paint each block average over a `block_size` x `block_size` square.
///
/// Returns a grayscale buffer of `(cols * block_size) * (rows * block_size)`
/// bytes, row-major. Each pixel is the floor of its block's average, clamped
/// to `[0, 255]`.
///
/// # Example
///
/// ```
/// use digit_downsample::{pixelize, Matrix};
///
/// let m = Matrix::from_vec(vec![10.9f32, 200.0], 2);
/// let gray = pixelize(&m, 2);
///
/// assert_eq!(gray, vec![10, 10, 200, 200, 10, 10, 200, 200]);
/// ```
pub fn pixelize(matrix: &DownsampledMatrix, block_size: usize) -> Vec<u8> {
    let out_width = matrix.width() * block_size;
    let mut gray = Vec::with_capacity(out_width * matrix.height() * block_size);

    for row in matrix.rows() {
        let line: Vec<u8> = row
            .iter()
            .flat_map(|&v| std::iter::repeat(v.floor().clamp(0.0, 255.0) as u8).take(block_size))
            .collect();
        for _ in 0..block_size {
            gray.extend_from_slice(&line);
        }
    }

    gray
}
