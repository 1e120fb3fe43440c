//! Comment extraction: post URL → (`PostInfo`, comments).

use std::sync::LazyLock;

use csa_scraper::{CommentSource, FetchLimits};
use regex::Regex;
use serde_json::Value;

use crate::error::SentimentError;
use crate::record::{OwnerFields, PostData, ProviderRecord, RecordKind};
use crate::types::{Comment, PostInfo, UNKNOWN_USERNAME};

static SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"instagram\.com/(?:p|reel)/([^/?]+)").expect("valid shortcode regex")
});

/// Extracts the post shortcode from an Instagram post or reel URL.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidUrl`] if the URL has no `/p/<id>` or
/// `/reel/<id>` segment.
pub fn parse_shortcode(post_url: &str) -> Result<String, SentimentError> {
    SHORTCODE_RE
        .captures(post_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| SentimentError::InvalidUrl(post_url.to_owned()))
}

/// Fetches a post's records from `source` and normalizes them.
///
/// The URL is validated before `source` is called.
///
/// # Errors
///
/// - [`SentimentError::InvalidUrl`]: no shortcode in `post_url`.
/// - [`SentimentError::ProviderUnavailable`]: the source gave up.
/// - [`SentimentError::EmptyResponse`]: the source returned no records.
/// - [`SentimentError::Unexpected`]: the source returned something unreadable.
pub async fn extract<S: CommentSource>(
    source: &S,
    post_url: &str,
    limits: FetchLimits,
) -> Result<(PostInfo, Vec<Comment>), SentimentError> {
    let shortcode = parse_shortcode(post_url)?;
    tracing::debug!(%shortcode, post_url, "extracted shortcode");

    let records = source.fetch_records(post_url, limits).await?;
    tracing::debug!(%shortcode, count = records.len(), "received provider records");

    normalize_records(shortcode, &records)
}

/// Rebuilds the post author and the ordered comment list from raw records.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyResponse`] if `records` is empty.
pub fn normalize_records(
    shortcode: String,
    records: &[Value],
) -> Result<(PostInfo, Vec<Comment>), SentimentError> {
    if records.is_empty() {
        return Err(SentimentError::EmptyResponse);
    }

    let records: Vec<ProviderRecord> = records.iter().map(ProviderRecord::classify).collect();

    let username = resolve_author(&records);
    let comments = collect_comments(records);

    tracing::debug!(
        %shortcode,
        author = %username,
        comments = comments.len(),
        "normalized provider records"
    );

    Ok((PostInfo { username, shortcode }, comments))
}

/// Resolves the post author. The record that picks the source:
///
/// 1. the first record carrying a `postData`/`postInfo` key; its object if
///    usable, otherwise the first record;
/// 2. without such a record, the first one flagged `isPostAuthor` and
///    (`isVerified` or `isCaption`);
/// 3. otherwise the first record;
///
/// reading `ownerUsername` then `owner.username` from the chosen source. If
/// that yields nothing, the first `isPostAuthor`/`isCaption` record with an
/// `ownerUsername`, then the first record's `ownerUsername`, then
/// [`UNKNOWN_USERNAME`].
fn resolve_author(records: &[ProviderRecord]) -> String {
    let first = records.first().map(|r| &r.owner);
    let post_source: Option<&OwnerFields> = match records
        .iter()
        .map(|r| &r.post_data)
        .find(|post_data| !matches!(post_data, PostData::Absent))
    {
        Some(PostData::Owner(owner)) => Some(owner),
        Some(_) => first,
        None => records
            .iter()
            .find(|r| r.flags.is_post_author && (r.flags.is_verified || r.flags.is_caption))
            .map(|r| &r.owner)
            .or(first),
    };

    post_source
        .and_then(OwnerFields::username)
        .or_else(|| {
            records
                .iter()
                .filter(|r| r.flags.is_post_author || r.flags.is_caption)
                .find_map(|r| r.owner.owner_username.as_deref())
        })
        .or_else(|| {
            records
                .first()
                .and_then(|r| r.owner.owner_username.as_deref())
        })
        .unwrap_or(UNKNOWN_USERNAME)
        .to_owned()
}

fn collect_comments(records: Vec<ProviderRecord>) -> Vec<Comment> {
    records
        .into_iter()
        .filter_map(|record| match record.kind {
            RecordKind::Comment(comment) => Some(comment),
            RecordKind::Caption => {
                tracing::debug!("skipping caption record");
                None
            }
            RecordKind::PostMetadata | RecordKind::Unrecognized => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
