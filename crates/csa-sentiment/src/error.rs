use csa_scraper::ScraperError;
use thiserror::Error;

/// Nothing survived extraction and scoring, so there is nothing to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No comments to analyze or no valid sentiment results.")]
pub struct NoDataError;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Invalid Instagram URL: {0}")]
    InvalidUrl(String),

    #[error("API request failed: {0}")]
    ProviderUnavailable(String),

    #[error("No data returned from API")]
    EmptyResponse,

    #[error(transparent)]
    NoData(#[from] NoDataError),

    #[error("Internal server error: {0}")]
    Unexpected(String),
}

impl From<ScraperError> for SentimentError {
    fn from(err: ScraperError) -> Self {
        match err {
            ScraperError::Http(_)
            | ScraperError::UnexpectedStatus { .. }
            | ScraperError::Exhausted { .. } => Self::ProviderUnavailable(err.to_string()),
            ScraperError::Deserialize { .. } | ScraperError::InvalidRequest(_) => {
                Self::Unexpected(err.to_string())
            }
        }
    }
}
