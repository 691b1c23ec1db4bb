//! Integration tests for /api/preprocess and /api/canvas.

mod common;

use axum::http::StatusCode;
use common::fixtures::{
    canvas_request, solid_pixels, solid_request, stroke_pixels, BLACK, CANVAS_SIDE, SCALE, WHITE,
};
use common::{
    assert_error_contains, assert_json_error, assert_ok, flatten_numbers, TestApp,
};
use digit_canvas::models::AppConfig;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_canvas_settings_defaults() {
    let app = TestApp::new();

    let response = app.get("/api/canvas").await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json,
        json!({
            "width": 588,
            "height": 588,
            "scale": 21,
            "line_width": 2,
            "stroke_width": 42,
            "grid": 28,
            "shape": "image",
        })
    );
}

#[tokio::test]
async fn test_canvas_settings_with_oversized_scale() {
    let mut config = AppConfig::default();
    config.canvas.scale = 200_000_000;
    let app = TestApp::with_config(config, None);

    let response = app.get("/api/canvas").await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["width"], u32::MAX);
    assert_eq!(json["stroke_width"], 400_000_000);
}

#[tokio::test]
async fn test_black_canvas_is_all_zeros() {
    let app = TestApp::new();

    let response = app.post_value("/api/preprocess", &solid_request(BLACK)).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["shape"], "image");
    assert_eq!(json["dims"], json!([1, 28, 28, 1]));
    assert_eq!(json["rows"], 28);
    assert_eq!(json["cols"], 28);

    let values = flatten_numbers(&json["data"]);
    assert_eq!(values.len(), 784);
    assert!(values.iter().all(|&v| v == 0.0));
}

#[tokio::test]
async fn test_white_canvas_is_all_ones() {
    let app = TestApp::new();

    let response = app.post_value("/api/preprocess", &solid_request(WHITE)).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    let values = flatten_numbers(&json["data"]);
    assert_eq!(values.len(), 784);
    assert!(values.iter().all(|&v| v == 1.0));
}

#[tokio::test]
async fn test_image_data_nesting() {
    let app = TestApp::new();

    let response = app.post_value("/api/preprocess", &solid_request(BLACK)).await;

    let json: serde_json::Value = response.json();
    let data = &json["data"];
    assert_eq!(data.as_array().map(Vec::len), Some(1));
    assert_eq!(data[0].as_array().map(Vec::len), Some(28));
    assert_eq!(data[0][0].as_array().map(Vec::len), Some(28));
    assert_eq!(data[0][0][0], json!([0.0]));
}

#[tokio::test]
async fn test_flat_shape_override() {
    let app = TestApp::new();
    let mut request = solid_request(WHITE);
    request["shape"] = json!("flat");

    let response = app.post_value("/api/preprocess", &request).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["shape"], "flat");
    assert_eq!(json["dims"], json!([1, 784]));
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["data"][0].as_array().map(Vec::len), Some(784));
}

#[tokio::test]
async fn test_vertical_stroke_lands_in_its_columns() {
    let app = TestApp::new();
    let pixels = stroke_pixels(CANVAS_SIDE, SCALE, 13, 14);
    let mut request = canvas_request(CANVAS_SIDE, CANVAS_SIDE, &pixels);
    request["shape"] = json!("flat");

    let response = app.post_value("/api/preprocess", &request).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    let values = flatten_numbers(&json["data"]);
    for (i, &v) in values.iter().enumerate() {
        let col = i % 28;
        let expected = if col == 13 || col == 14 { 1.0 } else { 0.0 };
        assert_eq!(v, expected, "cell {i}");
    }
}

#[tokio::test]
async fn test_scale_override() {
    let app = TestApp::new();
    let pixels = solid_pixels(280, 280, [51, 51, 51, 255]);
    let mut request = canvas_request(280, 280, &pixels);
    request["scale"] = json!(10);

    let response = app.post_value("/api/preprocess", &request).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["dims"], json!([1, 28, 28, 1]));
    let values = flatten_numbers(&json["data"]);
    assert!(values.iter().all(|&v| (v - 0.2).abs() < 1e-6));
}

#[tokio::test]
async fn test_non_square_canvas() {
    let app = TestApp::new();
    let pixels = solid_pixels(6, 4, WHITE);
    let mut request = canvas_request(6, 4, &pixels);
    request["scale"] = json!(2);

    let response = app.post_value("/api/preprocess", &request).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["cols"], 3);
    assert_eq!(json["dims"], json!([1, 2, 3, 1]));
}

#[tokio::test]
async fn test_rejects_canvas_not_divisible_by_scale() {
    let app = TestApp::new();
    let pixels = solid_pixels(280, 280, BLACK);

    let response = app
        .post_value("/api/preprocess", &canvas_request(280, 280, &pixels))
        .await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "does not evenly divide");
}

#[tokio::test]
async fn test_rejects_buffer_length_mismatch() {
    let app = TestApp::new();
    let pixels = solid_pixels(2, 2, BLACK);
    let mut request = canvas_request(4, 4, &pixels);
    request["scale"] = json!(2);

    let response = app.post_value("/api/preprocess", &request).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "expected 64");
}

#[tokio::test]
async fn test_rejects_zero_scale() {
    let app = TestApp::new();
    let mut request = solid_request(BLACK);
    request["scale"] = json!(0);

    let response = app.post_value("/api/preprocess", &request).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "block size must be at least 1");
}

#[tokio::test]
async fn test_rejects_empty_canvas() {
    let app = TestApp::new();

    let response = app
        .post_value("/api/preprocess", &canvas_request(0, 0, &[]))
        .await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "empty");
}

#[tokio::test]
async fn test_rejects_invalid_base64() {
    let app = TestApp::new();
    let request = json!({ "width": 1, "height": 1, "pixels": "@@@@", "scale": 1 });

    let response = app.post_value("/api/preprocess", &request).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "base64");
}

#[tokio::test]
async fn test_rejects_unknown_shape() {
    let app = TestApp::new();
    let mut request = solid_request(BLACK);
    request["shape"] = json!("cube");

    let response = app.post_value("/api/preprocess", &request).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert_error_contains(&response, "unknown tensor shape");
}

#[tokio::test]
async fn test_rejects_malformed_json() {
    let app = TestApp::new();

    let response = app.post_json("/api/preprocess", "{not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejects_missing_fields() {
    let app = TestApp::new();

    let response = app.post_json("/api/preprocess", r#"{"width": 4}"#).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_rejects_oversized_body() {
    let app = TestApp::new();
    let body = format!(
        r#"{{"width": 1, "height": 1, "pixels": "{}"}}"#,
        "A".repeat(17 * 1024 * 1024)
    );

    let response = app.post_json("/api/preprocess", &body).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}
