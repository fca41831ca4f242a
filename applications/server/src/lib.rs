//! Lyra Server Library
//!
//! Song catalog API and static host for the Lyra web player.
//!
//! This library exposes the router and its parts for the binary and for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Directories the router serves files from
#[derive(Debug, Clone)]
pub struct StaticDirs {
    /// Mounted at `/music`
    pub music_dir: PathBuf,
    /// Web UI root with `index.html`
    pub web_dir: PathBuf,
}

impl StaticDirs {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            music_dir: config.storage.music_dir.clone(),
            web_dir: config.web.dir.clone(),
        }
    }
}

/// Build the application router
pub fn create_router(app_state: AppState, dirs: &StaticDirs) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/songs", get(api::songs::list_songs));

    let web_dir = dirs.web_dir.clone();
    let spa_fallback = move |req: Request<Body>| {
        let web_dir = web_dir.clone();
        async move { serve_web(web_dir, req).await }
    };

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/music", ServeDir::new(&dirs.music_dir))
        .fallback(spa_fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Serve a file from the web directory, falling back to `index.html`
async fn serve_web(web_dir: PathBuf, req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if !path.is_empty() && is_plain_relative(path) {
        let file_path = web_dir.join(path);
        if file_path.is_file() {
            return match ServeDir::new(&web_dir).oneshot(req).await {
                Ok(res) => res.into_response(),
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            };
        }
    }

    let index_path = web_dir.join("index.html");
    if !index_path.is_file() {
        // No web UI available
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(&index_path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            contents,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(path = %index_path.display(), error = %e, "Failed to read index.html");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// True if `path` has no root, prefix or `..` components
fn is_plain_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
