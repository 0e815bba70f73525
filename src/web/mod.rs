//! HTTP front end.
//!
//! # Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET` | `/` | the SnapNews page |
//! | `POST` | `/summarize` | form: summarize the article at `url` |
//! | `POST` | `/top` | form: summarize the top articles of `source` |
//! | `GET` | `/api/summarize?url=` | JSON variant of `/summarize` |
//! | `GET` | `/api/top?source=` | JSON variant of `/top` |
//! | `GET` | `/api/sources` | the source registry |
//! | `GET` | `/static/*` | icon and banner images from the assets directory |
//!
//! Handlers never fail the request for a pipeline failure: the HTML routes
//! render a message, the JSON routes return an error body with a 4xx/5xx
//! status.

pub mod handlers;

use crate::pipeline::Pipeline;
use crate::scrapers::sources::SourceRegistry;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    registry: &'static SourceRegistry,
}

impl AppState {
    pub fn new(pipeline: Pipeline, registry: &'static SourceRegistry) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            registry,
        }
    }

    pub(crate) fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub(crate) fn registry(&self) -> &SourceRegistry {
        self.registry
    }

    pub(crate) fn top_n(&self) -> usize {
        self.pipeline.max_articles()
    }
}

/// Build the application router, serving static assets from `assets_dir`.
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/summarize", post(handlers::summarize_form))
        .route("/top", post(handlers::top_form))
        .route("/api/summarize", get(handlers::api_summarize))
        .route("/api/top", get(handlers::api_top))
        .route("/api/sources", get(handlers::api_sources))
        .nest_service("/static", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
