use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixel_enhance::{BufferError, LevelError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base64 image: {0}")]
    InvalidBase64(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(#[from] LevelError),

    #[error("Image error: {0}")]
    Codec(#[from] CodecError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures turning bytes into a [`pixel_enhance::PixelBuffer`] and back.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] BufferError),
}

impl CodecError {
    /// True when the input bytes were at fault rather than the encoder.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CodecError::Decode(_) | CodecError::Buffer(_))
    }
}

/// Remote polish failures. All of them fall back to the local result.
#[derive(Debug, Error)]
pub enum PolishError {
    #[error("Remote polish endpoint not configured")]
    NotConfigured,

    #[error("Could not build remote polish request: {0}")]
    Request(String),

    #[error("Remote polish transport error: {0}")]
    Transport(String),

    #[error("Remote polish timed out")]
    Timeout,

    #[error("Remote polish returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed remote polish payload: {0}")]
    MalformedPayload(String),

    #[error("Remote polish returned {actual_width}x{actual_height} for a {width}x{height} image")]
    DimensionMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

impl PolishError {
    /// Whether a later attempt could plausibly succeed. Nothing retries
    /// automatically; this only feeds logs and API warnings.
    pub fn is_transient(&self) -> bool {
        match self {
            PolishError::Transport(_) | PolishError::Timeout => true,
            PolishError::Status { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            PolishError::NotConfigured
            | PolishError::Request(_)
            | PolishError::MalformedPayload(_)
            | PolishError::DimensionMismatch { .. } => false,
        }
    }

    /// Short stable name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PolishError::NotConfigured => "not-configured",
            PolishError::Request(_) => "request",
            PolishError::Transport(_) => "transport",
            PolishError::Timeout => "timeout",
            PolishError::Status { .. } => "status",
            PolishError::MalformedPayload(_) | PolishError::DimensionMismatch { .. } => {
                "malformed-payload"
            }
        }
    }
}

impl From<reqwest::Error> for PolishError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PolishError::Timeout
        } else if e.is_decode() {
            PolishError::MalformedPayload(e.to_string())
        } else {
            PolishError::Transport(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBase64(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidLevel(_) => StatusCode::BAD_REQUEST,
            ApiError::Codec(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            ApiError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
