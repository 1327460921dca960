//! Mock remote polish endpoint.

use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use photo_polish::rendering::encode_base64;
use pixel_enhance::PixelBuffer;

use super::fixtures::png_of;

pub const POLISH_PATH: &str = "/v1/polish";

/// Wrapper around wiremock MockServer with polish-specific mocks
pub struct MockPolishServer {
    pub server: MockServer,
}

impl MockPolishServer {
    /// Start a new mock polish server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// URL of the polish endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), POLISH_PATH)
    }

    /// Respond with `result` as plain base64, expecting exactly `calls` requests
    /// carrying intensity 30
    pub async fn mock_success(&self, result: &PixelBuffer, calls: u64) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({ "intensity": 30 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "enhancedImage": encode_base64(&png_of(result)),
            })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Respond with `result` wrapped in a data URL
    pub async fn mock_success_data_url(&self, result: &PixelBuffer) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "enhancedImage": format!(
                    "data:image/png;base64,{}",
                    encode_base64(&png_of(result))
                ),
            })))
            .mount(&self.server)
            .await;
    }

    /// Require a bearer token
    pub async fn mock_with_bearer(&self, token: &str, result: &PixelBuffer) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "enhancedImage": encode_base64(&png_of(result)),
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Respond with an HTTP error
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// Respond with an arbitrary JSON body
    pub async fn mock_json(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Respond successfully but only after `delay`
    pub async fn mock_slow(&self, result: &PixelBuffer, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(POLISH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "enhancedImage": encode_base64(&png_of(result)),
                    }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Expect no requests at all
    pub async fn expect_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}
