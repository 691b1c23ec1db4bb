//! digit-downsample: turn a drawn RGBA canvas into classifier input
//!
//! A drawing surface hands over a high-resolution RGBA buffer whose sides
//! are an integer multiple (the *block size*) of the model's input side.
//! This crate reduces that buffer to a small grayscale matrix by averaging
//! square blocks and rescales it to `[0, 1]` floats.
//!
//! # Quick Start
//!
//! The [`Downsampler`] builder is the primary entry point:
//!
//! ```
//! use digit_downsample::{Downsampler, TensorShape};
//!
//! // 4x4 mid-grey canvas, 2x2 blocks
//! let rgba = [100u8, 100, 100, 255].repeat(16);
//!
//! let tensor = Downsampler::new(2)
//!     .shape(TensorShape::Flat)
//!     .process(&rgba, 4, 4)
//!     .unwrap();
//!
//! assert_eq!(tensor.dims(), vec![1, 4]);
//! assert!((tensor.values()[0] - 100.0 / 255.0).abs() < 1e-6);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! RGBA bytes              (width * height * 4, row-major)
//!     |
//!     v
//! to_grayscale            (round((r + g + b) / 3), alpha ignored)
//!     |
//!     v
//! PixelMatrix::from_vec   (rows of `width` values)
//!     |
//!     v
//! decompose               (block_size x block_size tiles, tile rows outer)
//!     |
//!     v
//! block_averages          (sum / block_size^2 per tile)
//!     |
//!     v
//! normalize               (/ 255, shaped as Image [1,h,w,1] or Flat [1,h*w])
//! ```
//!
//! Each stage is a pure function and is exported on its own; the builder
//! adds input validation in front of them. The stages themselves never
//! report errors: [`to_grayscale`] drops a trailing partial pixel and
//! [`decompose`] ignores remainder rows and columns. Going through
//! [`Downsampler`] turns those silent truncations into a [`DownsampleError`].
//!
//! # Non-square canvases
//!
//! Width and height are carried independently all the way through, so a
//! `56x28` canvas with block size 2 yields a `28x14` matrix (28 columns,
//! 14 rows).

pub mod api;
pub mod output;
pub mod preprocess;


pub use api::{DownsampleError, Downsampler};
pub use output::{normalize, pixelize, ParseShapeError, TensorInput, TensorShape};
pub use preprocess::{
    block_averages, decompose, to_grayscale, Block, DownsampledMatrix, Matrix, PixelMatrix,
};
