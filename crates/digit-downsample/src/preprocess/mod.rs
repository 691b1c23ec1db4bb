//! Stages of the downsampling pipeline.
//!
//! 1. **Grayscale** ([`to_grayscale`]) - mean of R, G, B per pixel
//! 2. **Reshape** ([`Matrix::from_vec`]) - flat vector to rows of `width`
//! 3. **Decompose** ([`decompose`]) - square tiles, tile rows outer
//! 4. **Average** ([`block_averages`]) - one value per tile
//!
//! None of these validate their input. Callers that need the
//! multiple-of-block-size guarantee go through [`crate::Downsampler`].

mod blocks;
mod grayscale;
mod matrix;

pub use blocks::{block_averages, decompose, Block};
pub use grayscale::to_grayscale;
pub use matrix::{DownsampledMatrix, Matrix, PixelMatrix};
