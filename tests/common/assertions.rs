//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;
use photo_polish::api::EnhanceResponse;
use photo_polish::rendering::{decode_base64_image, decode_png};
use pixel_enhance::PixelBuffer;

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

/// Assert response is a valid PNG image and decode it
pub fn assert_png(response: &TestResponse) -> PixelBuffer {
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
    decode_png(&response.body).expect("Response PNG should decode")
}

/// Assert a JSON error body with the given status
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

/// Assert a successful JSON enhancement and decode its image
pub fn assert_enhanced(response: &TestResponse) -> (EnhanceResponse, PixelBuffer) {
    assert_ok(response);
    let body: EnhanceResponse = response.json();
    assert_eq!(body.status, 200);
    let png = decode_base64_image(&body.image).expect("Response image should be base64");
    let buffer = decode_png(&png).expect("Response image should be a PNG");
    assert_eq!(buffer.dimensions(), (body.width, body.height));
    (body, buffer)
}
