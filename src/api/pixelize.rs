use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::canvas::CanvasRequest;
use crate::error::ApiError;
use crate::services::CanvasPipeline;

/// Render the downsampled canvas as a PNG
///
/// Each block is painted with its floored average so the preview has the
/// same size as the submitted canvas.
#[utoipa::path(
    post,
    path = "/api/pixelize",
    request_body = CanvasRequest,
    responses(
        (status = 200, description = "Grayscale PNG preview", content_type = "image/png"),
        (status = 400, description = "Malformed canvas or block size mismatch"),
        (status = 500, description = "Rendering error"),
    ),
    tag = "Canvas"
)]
pub async fn handle_pixelize(
    State(pipeline): State<Arc<CanvasPipeline>>,
    Json(request): Json<CanvasRequest>,
) -> Result<Response, ApiError> {
    let (canvas, options) = request.into_parts()?;

    // PNG optimization is CPU bound
    let png_bytes = tokio::task::spawn_blocking(move || pipeline.render_preview(&canvas, options))
        .await
        .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

    tracing::info!(size_bytes = png_bytes.len(), "Preview rendered");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}
