//! Provider request limits and the fetch seam used by the extractor.

use std::future::Future;

use serde_json::Value;

use crate::error::ScraperError;

/// Caps forwarded to the provider for a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub max_comments: u32,
    pub max_pages: u32,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_comments: 200,
            max_pages: 10,
        }
    }
}

/// Anything that can turn a post URL into the provider's raw record list.
///
/// Records are returned untouched, in provider order. Implementations own
/// their retry policy; a returned error means the source gave up.
pub trait CommentSource: Send + Sync {
    fn fetch_records(
        &self,
        post_url: &str,
        limits: FetchLimits,
    ) -> impl Future<Output = Result<Vec<Value>, ScraperError>> + Send;
}
