pub mod canvas;
pub mod config;

pub use canvas::{CanvasSpec, RgbaCanvas};
pub use config::{AppConfig, CanvasConfig, ModelConfig};
