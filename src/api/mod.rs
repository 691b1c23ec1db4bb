pub mod canvas;
pub mod pixelize;
pub mod predict;
pub mod preprocess;

pub use canvas::{handle_canvas, CanvasRequest, CanvasResponse, __path_handle_canvas};
pub use pixelize::{handle_pixelize, __path_handle_pixelize};
pub use predict::{handle_predict, PredictResponse, __path_handle_predict};
pub use preprocess::{handle_preprocess, PreprocessResponse, TensorData, __path_handle_preprocess};
