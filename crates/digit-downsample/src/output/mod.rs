//! Output types for the downsampling pipeline.
//!
//! - [`TensorInput`]: the `[0, 1]`-normalized model input, in either the
//!   rank-4 image layout or the rank-2 flattened layout ([`TensorShape`])
//! - [`pixelize`]: the downsampled matrix expanded back to canvas size, for
//!   previewing what the model sees

mod pixelize;
mod tensor;

pub use pixelize::pixelize;
pub use tensor::{normalize, ParseShapeError, TensorInput, TensorShape};
