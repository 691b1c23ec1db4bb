//! Digit Canvas
//!
//! Serves the preprocessing half of a handwritten digit recognizer: drawn
//! RGBA canvases are downsampled into classifier input, previewed as PNG,
//! and optionally classified by a loaded model.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
