//! HTTP gateway (Axum) serving the top-N view.
//!
//! This module is primarily used by the `beststories` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderMap, Method, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::best_stories_handler;
pub use payload::StoryResponse;
pub use state::HandlerState;

use crate::assembler::Assembler;
use crate::cache::StoryCache;
use crate::config::Config;
use crate::upstream::ItemSource;

pub const STATUS_HEADER: &str = "x-beststories-status";
pub const STATUS_OK: &str = "ok";
pub const STATUS_HEALTHY: &str = "healthy";

/// Builds the cache, resolvers and router for `source` from `config`.
pub fn create_router<S>(source: Arc<S>, config: &Config) -> Router
where
    S: ItemSource + 'static,
{
    let cache = StoryCache::with_capacity(config.cache_capacity);
    let assembler = Arc::new(Assembler::from_config(source, cache, config));
    create_router_with_state(HandlerState::new(assembler, config.request_timeout))
}

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: ItemSource + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/beststories/{n}", get(best_stories_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_origin(Any),
        )
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_HEALTHY));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
