use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use super::payload::StoryResponse;
use super::{STATUS_HEADER, STATUS_OK};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::upstream::ItemSource;

/// `GET /api/beststories/{n}`: the first `n` best stories as JSON.
///
/// The whole assembly runs under the configured request timeout; on expiry
/// every in-flight upstream call is dropped.
#[instrument(skip(state, path), fields(n = tracing::field::Empty))]
pub async fn best_stories_handler<S>(
    State(state): State<HandlerState<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, GatewayError>
where
    S: ItemSource + 'static,
{
    let Path(n) = path.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    tracing::Span::current().record("n", n);
    debug!("Best stories requested");

    let items = tokio::time::timeout(state.request_timeout, state.assembler.top(n))
        .await
        .map_err(|_| GatewayError::Timeout(state.request_timeout.as_millis()))??;

    let stories: Vec<StoryResponse> = items.into_iter().map(StoryResponse::from).collect();
    info!(returned = stories.len(), "Serving best stories");

    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    Ok((StatusCode::OK, headers, Json(stories)).into_response())
}
