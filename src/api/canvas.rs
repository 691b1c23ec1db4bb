use axum::{extract::State, response::Json};
use base64::Engine as _;
use digit_downsample::TensorShape;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::RgbaCanvas;
use crate::services::{CanvasOptions, CanvasPipeline};

/// A captured canvas as sent by the drawing client
#[derive(Debug, Deserialize, ToSchema)]
pub struct CanvasRequest {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Base64 encoded RGBA bytes, row-major, 4 bytes per pixel
    pub pixels: String,
    /// Block size override (default: configured `canvas.scale`)
    #[serde(default)]
    pub scale: Option<u32>,
    /// Tensor layout override: "image" or "flat" (default: configured `canvas.shape`)
    #[serde(default)]
    pub shape: Option<String>,
}

impl CanvasRequest {
    /// Decode the pixel payload and per-request options
    pub fn into_parts(self) -> Result<(RgbaCanvas, CanvasOptions), ApiError> {
        let pixels = base64::engine::general_purpose::STANDARD
            .decode(self.pixels.trim())
            .map_err(|e| ApiError::BadRequest(format!("pixels is not valid base64: {e}")))?;

        let shape = self
            .shape
            .as_deref()
            .map(str::parse::<TensorShape>)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let options = CanvasOptions {
            scale: self.scale,
            shape,
        };
        Ok((RgbaCanvas::new(self.width, self.height, pixels), options))
    }
}

/// Drawing surface settings for the client
#[derive(Debug, Serialize, ToSchema)]
pub struct CanvasResponse {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Pixels per grid cell, also the downsampling block size
    pub scale: u32,
    /// Pen width in grid cells
    pub line_width: u32,
    /// Pen width in pixels
    pub stroke_width: u32,
    /// Cells per side of the downsampled grid
    pub grid: u32,
    /// Default tensor layout
    pub shape: String,
}

/// Get the drawing surface geometry
///
/// Clients size their canvas and pen from this so every grid cell is one
/// downsampling block.
#[utoipa::path(
    get,
    path = "/api/canvas",
    responses(
        (status = 200, description = "Canvas settings", body = CanvasResponse),
    ),
    tag = "Canvas"
)]
pub async fn handle_canvas(State(pipeline): State<Arc<CanvasPipeline>>) -> Json<CanvasResponse> {
    let spec = pipeline.spec(None);
    Json(CanvasResponse {
        width: spec.width(),
        height: spec.height(),
        scale: spec.scale,
        line_width: spec.line_width,
        stroke_width: spec.stroke_width(),
        grid: spec.grid,
        shape: pipeline.config().shape.to_string(),
    })
}
