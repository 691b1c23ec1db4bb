use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use digit_downsample::DownsampleError;
use serde_json::json;
use thiserror::Error;

use crate::services::{ClassifierError, PipelineError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid canvas: {0}")]
    Downsample(#[from] DownsampleError),

    #[error("No model loaded")]
    ModelUnavailable,

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Downsample(e) => ApiError::Downsample(e),
            PipelineError::Render(e) => ApiError::Render(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedFormat(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Downsample(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::ModelUnavailable => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            // Canvas does not fit the loaded model
            ApiError::Classifier(ClassifierError::InputSize { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Classifier(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
