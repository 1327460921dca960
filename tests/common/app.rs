//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use photo_polish::models::{AppConfig, RemotePolishConfig};
use photo_polish::server::{build_router, create_app_state, create_app_state_with_polisher};
use photo_polish::services::RemotePolisher;

/// Test application wrapping the production router
pub struct TestApp {
    router: axum::Router,
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a test application with default configuration (no remote endpoint)
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application from a configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config).expect("Failed to create app state");
        let config = state.config.clone();
        Self {
            router: build_router(state),
            config,
        }
    }

    /// Create a test application whose remote polish points at `endpoint`
    pub fn with_remote(endpoint: &str, timeout_secs: u64) -> Self {
        Self::with_config(AppConfig {
            remote_polish: RemotePolishConfig {
                endpoint: Some(endpoint.to_string()),
                timeout_secs,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    /// Create a test application with a custom polisher
    pub fn with_polisher(polisher: Arc<dyn RemotePolisher>) -> Self {
        let state = create_app_state_with_polisher(AppConfig::default(), polisher);
        let config = state.config.clone();
        Self {
            router: build_router(state),
            config,
        }
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

    /// Make a POST request with a raw PNG body
    pub async fn post_png(&self, path: &str, png: Vec<u8>) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "image/png");
        self.request(builder.body(Body::from(png)).unwrap()).await
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

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
