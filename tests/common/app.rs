//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use digit_canvas::models::AppConfig;
use digit_canvas::server::{build_router, create_app_state_with_classifier, AppState};
use digit_canvas::services::Classifier;

/// Test application wrapping the production router
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Default configuration, no model loaded
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Default configuration with the given classifier
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self::with_config(AppConfig::default(), Some(classifier))
    }

    /// Custom configuration and optional classifier
    pub fn with_config(config: AppConfig, classifier: Option<Arc<dyn Classifier>>) -> Self {
        let state = create_app_state_with_classifier(&config, classifier);

        // Build router using shared server module (same as production)
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request with a serializable JSON body
    pub async fn post_value(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_json(path, &body.to_string()).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
