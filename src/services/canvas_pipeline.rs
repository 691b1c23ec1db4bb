use digit_downsample::{DownsampleError, DownsampledMatrix, Downsampler, TensorInput, TensorShape};

use crate::error::RenderError;
use crate::models::{CanvasConfig, CanvasSpec, RgbaCanvas};
use crate::rendering::render_preview_png;

/// Per-request overrides of the configured canvas settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasOptions {
    /// Block size; falls back to `canvas.scale`
    pub scale: Option<u32>,
    /// Tensor layout; falls back to `canvas.shape`
    pub shape: Option<TensorShape>,
}

/// Error from the canvas pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid canvas: {0}")]
    Downsample(#[from] DownsampleError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Canvas pipeline: RGBA capture -> downsampled matrix -> tensor or preview
pub struct CanvasPipeline {
    canvas: CanvasConfig,
}

impl CanvasPipeline {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self { canvas }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Drawing surface geometry, optionally at a different scale
    pub fn spec(&self, scale: Option<u32>) -> CanvasSpec {
        let spec = self.canvas.spec();
        match scale {
            Some(scale) => spec.with_scale(scale),
            None => spec,
        }
    }

    /// Downsampler for the effective scale and shape
    pub fn downsampler(&self, options: CanvasOptions) -> Downsampler {
        let scale = options.scale.unwrap_or(self.canvas.scale);
        let shape = options.shape.unwrap_or(self.canvas.shape);
        Downsampler::new(scale as usize).shape(shape)
    }

    /// Average the canvas down to one value per block
    pub fn downsample(
        &self,
        canvas: &RgbaCanvas,
        options: CanvasOptions,
    ) -> Result<DownsampledMatrix, PipelineError> {
        let downsampler = self.downsampler(options);
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            block_size = downsampler.block_size(),
            "Downsampling canvas"
        );

        let matrix = downsampler
            .downsample(&canvas.pixels, canvas.width as usize, canvas.height as usize)
            .inspect_err(|e| tracing::warn!(%e, "Rejected canvas"))?;

        tracing::debug!(
            rows = matrix.height(),
            cols = matrix.width(),
            "Downsampled canvas"
        );
        Ok(matrix)
    }

    /// Normalized classifier input for the canvas
    pub fn preprocess(
        &self,
        canvas: &RgbaCanvas,
        options: CanvasOptions,
    ) -> Result<TensorInput, PipelineError> {
        let downsampler = self.downsampler(options);
        let matrix = self.downsample(canvas, options)?;
        Ok(digit_downsample::normalize(
            &matrix,
            downsampler.output_shape(),
        ))
    }

    /// Grayscale PNG showing the canvas as the classifier sees it
    pub fn render_preview(
        &self,
        canvas: &RgbaCanvas,
        options: CanvasOptions,
    ) -> Result<Vec<u8>, PipelineError> {
        let block_size = self.downsampler(options).block_size();
        let matrix = self.downsample(canvas, options)?;
        Ok(render_preview_png(&matrix, block_size)?)
    }
}
