//! HTTP client for the Apify run-sync dataset endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::ScraperError;
use crate::retry::{retry_bounded, MAX_ATTEMPTS};
use crate::types::{CommentSource, FetchLimits};

/// Longest slice of an error body carried into [`ScraperError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Actor input accepted by the Instagram comment scraper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunInput<'a> {
    direct_urls: [&'a str; 1],
    max_comments: u32,
    max_pages: u32,
}

/// Client for a synchronous Apify actor run that returns its dataset items.
///
/// Every non-2xx status and every transport failure is retried, up to
/// [`MAX_ATTEMPTS`] calls in total, with no delay in between.
pub struct ApifyClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl ApifyClient {
    /// Creates an `ApifyClient` with the given per-attempt timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: &str,
        api_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            api_token: api_token.to_owned(),
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`ApifyClient::new`].
    pub fn from_config(config: &csa_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.provider_url,
            &config.apify_api_token,
            config.provider_timeout_secs,
            &config.provider_user_agent,
        )
    }

    /// Fetches the raw dataset items for one post.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidRequest`]: the endpoint is not a valid URL (not retried).
    /// - [`ScraperError::Deserialize`]: the body is not a JSON array (not retried).
    /// - [`ScraperError::Exhausted`]: all attempts failed on transport or status.
    pub async fn fetch_comment_records(
        &self,
        post_url: &str,
        limits: FetchLimits,
    ) -> Result<Vec<Value>, ScraperError> {
        let url = self.run_url()?;
        let input = RunInput {
            direct_urls: [post_url],
            max_comments: limits.max_comments,
            max_pages: limits.max_pages,
        };

        let records = retry_bounded(MAX_ATTEMPTS, || {
            let url = url.clone();
            let input = &input;
            async move {
                let response = self.client.post(url).json(input).send().await?;
                let status = response.status();

                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        body: truncate_body(&body),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Vec<Value>>(&body).map_err(|e| ScraperError::Deserialize {
                    context: format!("dataset items for {post_url}"),
                    source: e,
                })
            }
        })
        .await?;

        tracing::debug!(post_url, count = records.len(), "provider returned records");
        Ok(records)
    }

    /// Builds the endpoint URL with the API token attached as a query pair.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidRequest`] if the configured endpoint is
    /// not an absolute URL.
    fn run_url(&self) -> Result<reqwest::Url, ScraperError> {
        let mut url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ScraperError::InvalidRequest(format!(
                "provider endpoint \"{}\" is not a valid URL: {e}",
                self.endpoint
            ))
        })?;
        url.query_pairs_mut().append_pair("token", &self.api_token);
        Ok(url)
    }
}

impl CommentSource for ApifyClient {
    async fn fetch_records(
        &self,
        post_url: &str,
        limits: FetchLimits,
    ) -> Result<Vec<Value>, ScraperError> {
        self.fetch_comment_records(post_url, limits).await
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_owned();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
