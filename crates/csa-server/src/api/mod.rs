mod sentiment;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use csa_scraper::{ApifyClient, FetchLimits};
use csa_sentiment::{PolarityScorer, SentimentError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<ApifyClient>,
    pub scorer: Arc<dyn PolarityScorer>,
    pub limits: FetchLimits,
}

/// Failure body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<SentimentError> for ApiError {
    fn from(err: SentimentError) -> Self {
        let status = match &err {
            SentimentError::InvalidUrl(_)
            | SentimentError::ProviderUnavailable(_)
            | SentimentError::EmptyResponse => StatusCode::BAD_REQUEST,
            SentimentError::NoData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SentimentError::Unexpected(_) => {
                tracing::error!(error = %err, "unexpected pipeline failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/analyze-sentiment",
            post(sentiment::analyze_sentiment),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(cors_origins))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use csa_sentiment::LexiconScorer;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RUN_PATH: &str = "/run-sync-get-dataset-items";
    const POST_URL: &str = "https://www.instagram.com/p/Cxyz123/";

    fn app(server_uri: &str) -> Router {
        app_with_timeout(server_uri, 5)
    }

    fn app_with_timeout(server_uri: &str, timeout_secs: u64) -> Router {
        let source = ApifyClient::new(
            &format!("{server_uri}{RUN_PATH}"),
            "test-token",
            timeout_secs,
            "csa-test/0.1",
        )
        .expect("client");
        let state = AppState {
            source: Arc::new(source),
            scorer: Arc::new(LexiconScorer::new()),
            limits: FetchLimits::default(),
        };
        build_app(state, &["http://localhost:3000".to_string()])
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze-sentiment")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_owned()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&bytes).expect("json parse");
        (status, json)
    }

    async fn mount_dataset(server: &MockServer, status: u16, body: Value, times: u64) {
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }

    #[test]
    fn sentiment_errors_map_to_statuses() {
        let cases = [
            (SentimentError::InvalidUrl("x".into()), StatusCode::BAD_REQUEST),
            (
                SentimentError::ProviderUnavailable("down".into()),
                StatusCode::BAD_REQUEST,
            ),
            (SentimentError::EmptyResponse, StatusCode::BAD_REQUEST),
            (
                SentimentError::NoData(csa_sentiment::NoDataError),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SentimentError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[tokio::test]
    async fn health_returns_ok_and_request_id() {
        let response = app("http://127.0.0.1:9")
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").map(HeaderValue::as_bytes),
            Some(b"req-42".as_slice())
        );
    }

    #[tokio::test]
    async fn missing_post_url_is_bad_request() {
        let (status, json) = post_json(app("http://127.0.0.1:9"), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Missing post_url parameter"}));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, json) = post_json(app("http://127.0.0.1:9"), "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing post_url parameter");
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_provider_call() {
        let server = MockServer::start().await;
        mount_dataset(&server, 200, json!([]), 0).await;

        let (status, json) = post_json(
            app(&server.uri()),
            r#"{"post_url": "https://www.instagram.com/someone/"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]
            .as_str()
            .expect("error string")
            .starts_with("Invalid Instagram URL"));
    }

    #[tokio::test]
    async fn provider_failures_are_retried_then_reported() {
        let server = MockServer::start().await;
        mount_dataset(&server, 500, json!({"error": "actor crashed"}), 3).await;

        let (status, json) = post_json(
            app(&server.uri()),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["error"].as_str().expect("error string");
        assert!(message.starts_with("API request failed"), "{message}");
        assert!(message.contains("3 attempts"), "{message}");
    }

    #[tokio::test]
    async fn provider_timeouts_are_retried_then_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(std::time::Duration::from_secs(2)),
            )
            .expect(3)
            .mount(&server)
            .await;

        let (status, json) = post_json(
            app_with_timeout(&server.uri(), 1),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["error"].as_str().expect("error string");
        assert!(message.starts_with("API request failed"), "{message}");
        assert!(message.contains("3 attempts"), "{message}");
    }

    #[tokio::test]
    async fn empty_dataset_is_reported() {
        let server = MockServer::start().await;
        mount_dataset(&server, 200, json!([]), 1).await;

        let (status, json) = post_json(
            app(&server.uri()),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "No data returned from API"}));
    }

    #[tokio::test]
    async fn caption_only_dataset_is_unprocessable() {
        let server = MockServer::start().await;
        mount_dataset(
            &server,
            200,
            json!([{"ownerUsername": "brand", "text": "caption", "isCaption": true}]),
            1,
        )
        .await;

        let (status, json) = post_json(
            app(&server.uri()),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json,
            json!({"error": "No comments to analyze or no valid sentiment results."})
        );
    }

    #[tokio::test]
    async fn non_array_dataset_is_internal_error() {
        let server = MockServer::start().await;
        mount_dataset(&server, 200, json!({"items": []}), 1).await;

        let (status, json) = post_json(
            app(&server.uri()),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"]
            .as_str()
            .expect("error string")
            .starts_with("Internal server error"));
    }

    #[tokio::test]
    async fn successful_analysis_returns_summary() {
        let server = MockServer::start().await;
        mount_dataset(
            &server,
            201,
            json!([
                {"postData": {"ownerUsername": "brand"}},
                {"ownerUsername": "brand", "text": "Out now!", "isCaption": true},
                {"ownerUsername": "a", "text": "love it, amazing"},
                {"ownerUsername": "b", "commentText": "this is terrible"}
            ]),
            1,
        )
        .await;

        let (status, json) = post_json(
            app(&server.uri()),
            &json!({ "post_url": POST_URL }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["post_info"],
            json!({"username": "brand", "shortcode": "Cxyz123"})
        );
        assert_eq!(json["stats"]["total_comments"], 2);
        assert_eq!(json["stats"]["positive_count"], 1);
        assert_eq!(json["stats"]["negative_count"], 1);
        assert_eq!(json["highlights"]["most_positive"]["username"], "a");
        assert_eq!(json["highlights"]["most_negative"]["username"], "b");
        assert_eq!(json["comments"].as_array().map(Vec::len), Some(2));
    }
}
