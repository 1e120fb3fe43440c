//! Sentiment pipeline orchestration.

use csa_scraper::{CommentSource, FetchLimits};

use crate::aggregate::summarize;
use crate::error::SentimentError;
use crate::extract::extract;
use crate::scorer::{score_comments, PolarityScorer};
use crate::types::Summary;

/// Runs the full pipeline for one post.
///
/// 1. Extract the post author and comments via `source`.
/// 2. Score each comment with `scorer`.
/// 3. Summarize the scored comments.
///
/// # Errors
///
/// Returns whichever [`SentimentError`] the failing stage produced. A post
/// whose records hold no usable comments yields [`SentimentError::NoData`].
pub async fn analyze_post<S, P>(
    source: &S,
    scorer: &P,
    post_url: &str,
    limits: FetchLimits,
) -> Result<Summary, SentimentError>
where
    S: CommentSource,
    P: PolarityScorer + ?Sized,
{
    let (post_info, comments) = extract(source, post_url, limits).await?;
    let extracted = comments.len();

    let scored = score_comments(scorer, comments);
    if scored.len() != extracted {
        tracing::warn!(
            shortcode = %post_info.shortcode,
            extracted,
            scored = scored.len(),
            "some comments were dropped during scoring"
        );
    }

    Ok(summarize(post_info, scored)?)
}
