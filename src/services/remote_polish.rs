use crate::error::PolishError;
use crate::models::RemotePolishConfig;
use crate::rendering::{decode_base64_image, decode_png, encode_base64, encode_png};
use async_trait::async_trait;
use pixel_enhance::{EnhancementLevel, PixelBuffer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Longest slice of an error response body kept in [`PolishError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// External service that applies a final touch-up to an enhanced image.
#[async_trait]
pub trait RemotePolisher: Send + Sync {
    /// Submit an image and wait for the polished result.
    async fn polish(
        &self,
        image: &PixelBuffer,
        intensity: EnhancementLevel,
        instruction: &str,
    ) -> Result<PixelBuffer, PolishError>;
}

/// Request body sent to the polish endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishRequest {
    /// Base64 PNG
    pub image: String,
    pub intensity: u8,
    pub instruction: String,
}

/// Response body returned by the polish endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishResponse {
    /// Base64 PNG, optionally as a data URL
    pub enhanced_image: String,
}

/// Stand-in used when no endpoint is configured. Every call fails, so
/// callers fall back to the local result.
#[derive(Debug, Default)]
pub struct UnconfiguredPolisher;

#[async_trait]
impl RemotePolisher for UnconfiguredPolisher {
    async fn polish(
        &self,
        _image: &PixelBuffer,
        _intensity: EnhancementLevel,
        _instruction: &str,
    ) -> Result<PixelBuffer, PolishError> {
        Err(PolishError::NotConfigured)
    }
}

/// JSON-over-HTTP polish client.
pub struct HttpPolishClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPolishClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PolishError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PolishError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemotePolisher for HttpPolishClient {
    async fn polish(
        &self,
        image: &PixelBuffer,
        intensity: EnhancementLevel,
        instruction: &str,
    ) -> Result<PixelBuffer, PolishError> {
        let png = encode_png(image).map_err(|e| PolishError::Request(e.to_string()))?;
        let body = PolishRequest {
            image: encode_base64(&png),
            intensity: intensity.get(),
            instruction: instruction.to_string(),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            intensity = body.intensity,
            bytes = png.len(),
            "Sending remote polish request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(PolishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let payload: PolishResponse = serde_json::from_slice(&bytes)
            .map_err(|e| PolishError::MalformedPayload(format!("Invalid JSON: {e}")))?;
        let png = decode_base64_image(&payload.enhanced_image)
            .map_err(|e| PolishError::MalformedPayload(format!("Invalid base64: {e}")))?;
        let polished =
            decode_png(&png).map_err(|e| PolishError::MalformedPayload(e.to_string()))?;

        tracing::debug!(
            width = polished.width(),
            height = polished.height(),
            "Remote polish response decoded"
        );
        Ok(polished)
    }
}

/// Build the polisher described by the configuration.
///
/// Without an endpoint this is an [`UnconfiguredPolisher`].
pub fn polisher_from_config(
    config: &RemotePolishConfig,
) -> Result<Arc<dyn RemotePolisher>, PolishError> {
    match &config.endpoint {
        Some(endpoint) => {
            let api_key = config.api_key();
            tracing::info!(
                endpoint = %endpoint,
                authenticated = api_key.is_some(),
                timeout_secs = config.timeout_secs,
                "Remote polish enabled"
            );
            let client = HttpPolishClient::new(
                endpoint.clone(),
                api_key,
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(client))
        }
        None => {
            tracing::info!("Remote polish endpoint not configured");
            Ok(Arc::new(UnconfiguredPolisher))
        }
    }
}
