use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    Json as JsonExtractor,
};
use pixel_enhance::EnhancementLevel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::{decode_base64_image, encode_base64};
use crate::services::EnhancementService;

pub const MODE_HEADER: &str = "x-enhance-mode";
pub const REMOTE_HEADER: &str = "x-enhance-remote";
pub const WARNING_HEADER: &str = "x-enhance-warning";

/// Request body for JSON enhancement
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnhanceRequest {
    /// Base64 PNG, plain or as a `data:image/png;base64,` URL
    pub image: String,
    /// Enhancement level 0-100 (default from config)
    #[serde(default)]
    pub level: Option<i64>,
}

/// Response from JSON enhancement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnhanceResponse {
    /// Status code (200 = success)
    pub status: u16,
    pub width: u32,
    pub height: u32,
    /// Level that was applied
    pub level: u8,
    /// `local-only` or `local-plus-remote`
    pub mode: String,
    /// `not-requested`, `applied` or `failed`
    pub remote: String,
    /// Present when remote polish failed and the local result was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Enhanced image as base64 PNG
    pub image: String,
}

/// Query parameters for raw PNG enhancement
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnhanceQuery {
    /// Enhancement level 0-100 (default from config)
    #[serde(default)]
    pub level: Option<i64>,
}

fn resolve_level(requested: Option<i64>, config: &AppConfig) -> Result<EnhancementLevel, ApiError> {
    match requested {
        Some(level) => Ok(EnhancementLevel::try_from(level)?),
        None => Ok(EnhancementLevel::saturating(config.default_level)),
    }
}

/// Enhance a base64 PNG
///
/// Runs the local pipeline and, above level 75, the remote polish pass.
/// Remote failures return the local result with a warning.
#[utoipa::path(
    post,
    path = "/api/enhance",
    request_body = EnhanceRequest,
    responses(
        (status = 200, description = "Image enhanced", body = EnhanceResponse),
        (status = 400, description = "Invalid image, base64, or level"),
        (status = 500, description = "Encoding failed"),
    ),
    tag = "Enhance"
)]
pub async fn handle_enhance(
    State(service): State<Arc<EnhancementService>>,
    State(config): State<Arc<AppConfig>>,
    JsonExtractor(request): JsonExtractor<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    let level = resolve_level(request.level, &config)?;
    let png = decode_base64_image(&request.image).map_err(ApiError::InvalidBase64)?;

    tracing::info!(level = level.get(), bytes = png.len(), "Enhance request received");

    let encoded = service.enhance_png(png, level).await?;
    let warning = encoded.remote.warning();

    Ok(Json(EnhanceResponse {
        status: 200,
        width: encoded.width,
        height: encoded.height,
        level: encoded.level.get(),
        mode: encoded.mode.as_str().to_string(),
        remote: encoded.remote.as_str().to_string(),
        warning,
        image: encode_base64(&encoded.png),
    }))
}

/// Enhance a raw PNG body
///
/// Returns the enhanced PNG. The `X-Enhance-Mode` and `X-Enhance-Remote`
/// headers describe how it was produced; `X-Enhance-Warning` names the
/// failure class when remote polish fell back to the local result.
#[utoipa::path(
    post,
    path = "/api/enhance/png",
    request_body(content = Vec<u8>, content_type = "image/png"),
    params(EnhanceQuery),
    responses(
        (status = 200, description = "Enhanced PNG", content_type = "image/png"),
        (status = 400, description = "Invalid image or level"),
        (status = 500, description = "Encoding failed"),
    ),
    tag = "Enhance"
)]
pub async fn handle_enhance_png(
    State(service): State<Arc<EnhancementService>>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<EnhanceQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let level = resolve_level(query.level, &config)?;

    tracing::info!(level = level.get(), bytes = body.len(), "PNG enhance request received");

    let encoded = service.enhance_png(body.to_vec(), level).await?;

    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &encoded.png.len().to_string()),
        ],
        Bytes::from(encoded.png),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(MODE_HEADER),
        HeaderValue::from_static(encoded.mode.as_str()),
    );
    headers.insert(
        HeaderName::from_static(REMOTE_HEADER),
        HeaderValue::from_static(encoded.remote.as_str()),
    );
    if let crate::services::RemoteStatus::Failed(e) = &encoded.remote {
        headers.insert(
            HeaderName::from_static(WARNING_HEADER),
            HeaderValue::from_static(e.kind()),
        );
    }

    Ok(response)
}
