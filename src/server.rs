//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::PngCodec;
use crate::services::{polisher_from_config, EnhancementService, RemotePolisher};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub enhancer: Arc<EnhancementService>,
}

/// Create application state from configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let polisher = polisher_from_config(&config.remote_polish)
        .map_err(|e| anyhow::anyhow!("Failed to create remote polish client: {e}"))?;
    Ok(create_app_state_with_polisher(config, polisher))
}

/// Create application state with an explicit remote polisher.
pub fn create_app_state_with_polisher(
    config: AppConfig,
    polisher: Arc<dyn RemotePolisher>,
) -> AppState {
    let codec = PngCodec::new(config.optimize_png);
    let enhancer = Arc::new(EnhancementService::new(polisher, codec));

    AppState {
        config: Arc::new(config),
        enhancer,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Enhancement endpoints
        .route("/api/enhance", post(handle_enhance))
        .route("/api/enhance/png", post(handle_enhance_png))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state, body limit and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_enhance(
    State(state): State<AppState>,
    request: axum::Json<api::EnhanceRequest>,
) -> Result<axum::Json<api::EnhanceResponse>, ApiError> {
    api::handle_enhance(State(state.enhancer), State(state.config), request).await
}

async fn handle_enhance_png(
    State(state): State<AppState>,
    query: Query<api::EnhanceQuery>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_enhance_png(State(state.enhancer), State(state.config), query, body).await
}
