pub mod png_io;
pub mod preview;

pub use png_io::{decode_rgba, encode_grayscale};
pub use preview::render_preview_png;
