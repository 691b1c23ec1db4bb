//! Pixelized preview of what the classifier sees.

use digit_downsample::{pixelize, DownsampledMatrix};

use crate::error::RenderError;
use crate::rendering::png_io::encode_grayscale;

/// Render a downsampled matrix back at canvas resolution as a grayscale PNG.
///
/// Every block is painted with the floor of its average, so the preview is
/// `cols * block_size` by `rows * block_size` pixels.
pub fn render_preview_png(
    matrix: &DownsampledMatrix,
    block_size: usize,
) -> Result<Vec<u8>, RenderError> {
    let width = matrix.width() * block_size;
    let height = matrix.height() * block_size;
    let gray = pixelize(matrix, block_size);

    let png_bytes = encode_grayscale(width as u32, height as u32, &gray)?;
    tracing::debug!(width, height, bytes = png_bytes.len(), "Rendered preview PNG");
    Ok(png_bytes)
}
