//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{CanvasPipeline, Classifier, DenseModel};

/// Base64 RGBA payloads for a 588x588 canvas are about 1.8 MB
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CanvasPipeline>,
    pub classifier: Option<Arc<dyn Classifier>>,
}

/// Create application state from configuration.
///
/// Loads the model named by `model.path`, if any. Invalid canvas geometry
/// or a configured model that fails to load is a startup error.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    config
        .canvas
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid canvas config: {e}"))?;

    let classifier = match config.model_path() {
        Some(path) => {
            let model = DenseModel::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load model {}: {e}", path.display()))?;
            Some(Arc::new(model) as Arc<dyn Classifier>)
        }
        None => {
            tracing::info!("No model configured, /api/predict is disabled");
            None
        }
    };

    Ok(create_app_state_with_classifier(config, classifier))
}

/// Create application state with an explicit classifier.
pub fn create_app_state_with_classifier(
    config: &AppConfig,
    classifier: Option<Arc<dyn Classifier>>,
) -> AppState {
    AppState {
        pipeline: Arc::new(CanvasPipeline::new(config.canvas.clone())),
        classifier,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Canvas endpoints
        .route("/api/canvas", get(handle_canvas))
        .route("/api/preprocess", post(handle_preprocess))
        .route("/api/pixelize", post(handle_pixelize))
        .route("/api/predict", post(handle_predict))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        // Every response is computed from the request body
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_canvas(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<api::CanvasResponse> {
    api::handle_canvas(axum::extract::State(state.pipeline)).await
}

async fn handle_preprocess(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::Json<api::CanvasRequest>,
) -> Result<axum::Json<api::PreprocessResponse>, ApiError> {
    api::handle_preprocess(axum::extract::State(state.pipeline), request).await
}

async fn handle_pixelize(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::Json<api::CanvasRequest>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_pixelize(axum::extract::State(state.pipeline), request).await
}

async fn handle_predict(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::Json<api::CanvasRequest>,
) -> Result<axum::Json<api::PredictResponse>, ApiError> {
    api::handle_predict(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.classifier),
        request,
    )
    .await
}
