use axum::{extract::State, response::Json};
use digit_downsample::{TensorInput, TensorShape};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::canvas::CanvasRequest;
use crate::error::ApiError;
use crate::services::CanvasPipeline;

/// Tensor values nested to match their dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TensorData {
    /// `[1][rows][cols][1]`
    Image(Vec<Vec<Vec<Vec<f32>>>>),
    /// `[1][rows * cols]`
    Flat(Vec<Vec<f32>>),
}

impl TensorData {
    pub fn from_tensor(tensor: &TensorInput) -> Self {
        match tensor.shape() {
            TensorShape::Image => {
                let rows = tensor
                    .values()
                    .chunks(tensor.cols().max(1))
                    .map(|row| row.iter().map(|&v| vec![v]).collect())
                    .collect();
                TensorData::Image(vec![rows])
            }
            TensorShape::Flat => TensorData::Flat(vec![tensor.values().to_vec()]),
        }
    }
}

/// Normalized classifier input
#[derive(Debug, Serialize, ToSchema)]
pub struct PreprocessResponse {
    /// Tensor layout ("image" or "flat")
    pub shape: String,
    /// Tensor dimensions, `[1, rows, cols, 1]` or `[1, rows * cols]`
    pub dims: Vec<usize>,
    /// Downsampled rows
    pub rows: usize,
    /// Downsampled columns
    pub cols: usize,
    /// Values in `[0, 1]`, nested to match `dims`
    #[schema(value_type = Object)]
    pub data: TensorData,
}

impl PreprocessResponse {
    pub fn from_tensor(tensor: &TensorInput) -> Self {
        Self {
            shape: tensor.shape().to_string(),
            dims: tensor.dims(),
            rows: tensor.rows(),
            cols: tensor.cols(),
            data: TensorData::from_tensor(tensor),
        }
    }
}

/// Downsample a canvas into classifier input
///
/// Converts the RGBA capture to grayscale, averages each `scale` x `scale`
/// block and rescales the result to `[0, 1]`.
#[utoipa::path(
    post,
    path = "/api/preprocess",
    request_body = CanvasRequest,
    responses(
        (status = 200, description = "Normalized tensor", body = PreprocessResponse),
        (status = 400, description = "Malformed canvas or block size mismatch"),
    ),
    tag = "Canvas"
)]
pub async fn handle_preprocess(
    State(pipeline): State<Arc<CanvasPipeline>>,
    Json(request): Json<CanvasRequest>,
) -> Result<Json<PreprocessResponse>, ApiError> {
    let (canvas, options) = request.into_parts()?;
    let tensor = pipeline.preprocess(&canvas, options)?;

    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        shape = %tensor.shape(),
        "Canvas preprocessed"
    );

    Ok(Json(PreprocessResponse::from_tensor(&tensor)))
}
