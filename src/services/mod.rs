pub mod canvas_pipeline;
pub mod classifier;

pub use canvas_pipeline::{CanvasOptions, CanvasPipeline, PipelineError};
pub use classifier::{
    rank_predictions, Activation, Classifier, ClassifierError, DenseLayer, DenseModel, Prediction,
};
