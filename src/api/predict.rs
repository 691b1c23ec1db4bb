use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::canvas::CanvasRequest;
use crate::error::ApiError;
use crate::services::{rank_predictions, CanvasPipeline, Classifier, Prediction};

/// Ranked digit predictions
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    /// Digits with a non-zero probability, most likely first
    pub predictions: Vec<Prediction>,
}

/// Classify a canvas
///
/// Preprocesses the canvas and runs it through the loaded model. Returns
/// 503 when the server was started without a model.
#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = CanvasRequest,
    responses(
        (status = 200, description = "Ranked predictions", body = PredictResponse),
        (status = 400, description = "Malformed canvas or canvas does not fit the model"),
        (status = 503, description = "No model loaded"),
    ),
    tag = "Classifier"
)]
pub async fn handle_predict(
    State(pipeline): State<Arc<CanvasPipeline>>,
    State(classifier): State<Option<Arc<dyn Classifier>>>,
    Json(request): Json<CanvasRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let classifier = classifier.ok_or(ApiError::ModelUnavailable)?;
    let (canvas, options) = request.into_parts()?;
    let tensor = pipeline.preprocess(&canvas, options)?;

    let scores = classifier.predict(&tensor).await?;
    let predictions = rank_predictions(&scores);

    if let Some(top) = predictions.first() {
        tracing::info!(
            digit = top.digit,
            probability = top.probability,
            "Canvas classified"
        );
    }

    Ok(Json(PredictResponse { predictions }))
}
