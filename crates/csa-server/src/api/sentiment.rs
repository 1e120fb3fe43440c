use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use csa_sentiment::{analyze_post, SentimentError, Summary};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub post_url: Option<String>,
}

/// `POST /api/analyze-sentiment`
///
/// The pipeline runs in its own task so that a panic in one request is
/// reported as an internal error instead of tearing down the connection.
pub(super) async fn analyze_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Summary>, ApiError> {
    let post_url = body
        .ok()
        .and_then(|Json(req)| req.post_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            tracing::warn!(request_id = %req_id.0, "missing post_url parameter");
            ApiError::bad_request("Missing post_url parameter")
        })?;

    tracing::debug!(request_id = %req_id.0, post_url = %post_url, "analyzing post");

    let source = state.source.clone();
    let scorer = state.scorer.clone();
    let limits = state.limits;
    let task = tokio::spawn(async move {
        analyze_post(source.as_ref(), scorer.as_ref(), &post_url, limits).await
    });

    let result = match task.await {
        Ok(result) => result,
        Err(e) => Err(SentimentError::Unexpected(e.to_string())),
    };

    result.map(Json).map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "sentiment analysis failed");
        ApiError::from(e)
    })
}
