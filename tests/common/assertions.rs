//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response with the JSON `{status, error}` body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);

    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert the error message mentions `needle`
pub fn assert_error_contains(response: &TestResponse, needle: &str) {
    let json: serde_json::Value = response.json();
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(needle),
        "Expected error containing {needle:?}, got {message:?}"
    );
}

/// Flatten a nested JSON number array
pub fn flatten_numbers(value: &serde_json::Value) -> Vec<f64> {
    match value {
        serde_json::Value::Array(items) => items.iter().flat_map(flatten_numbers).collect(),
        serde_json::Value::Number(n) => vec![n.as_f64().unwrap_or(f64::NAN)],
        other => panic!("Unexpected value in tensor data: {other}"),
    }
}
