//! Public API for the digit-downsample crate.
//!
//! This module provides the high-level API: the [`Downsampler`] builder and
//! the [`DownsampleError`] validation error.

mod builder;
mod error;

pub use builder::Downsampler;
pub use error::DownsampleError;
