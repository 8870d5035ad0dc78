//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::{Config, MediaKind, StorageBackend};
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let limits = state.limits;

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(
            "/videos/{video_id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail).layer(DefaultBodyLimit::max(
                limits.max_body_bytes(MediaKind::Thumbnail),
            )),
        )
        .route(
            "/videos/{video_id}/video",
            post(handlers::video_upload::upload_video).layer(DefaultBodyLimit::max(
                limits.max_body_bytes(MediaKind::Video),
            )),
        )
        .with_state(state);

    if config.storage_backend() == StorageBackend::Local {
        tracing::info!(assets_root = %config.assets_root(), "Serving local assets at /assets");
        app = app.nest_service("/assets", ServeDir::new(config.assets_root()));
    }

    Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins()
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}
