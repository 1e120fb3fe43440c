//! Bounded retry for provider calls.
//!
//! The provider is retried immediately, with no delay between attempts; each
//! attempt is already bounded by the HTTP client's timeout.

use std::future::Future;

use crate::error::ScraperError;

/// Total number of provider attempts per request, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Returns `true` if `err` is a transient provider failure worth another attempt.
///
/// Retriable:
/// - [`ScraperError::Http`]: connection failure, timeout, TLS error.
/// - [`ScraperError::UnexpectedStatus`]: any non-2xx answer (rate limits, 5xx,
///   the provider's own run failures).
///
/// Everything else (bad request construction, undecodable body) would fail
/// the same way again and is returned immediately.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
    )
}

/// Runs `operation` up to `max_attempts` times, stopping at the first success.
///
/// Non-retriable errors are returned as-is after a single call. When every
/// attempt fails with a retriable error, the last one is wrapped in
/// [`ScraperError::Exhausted`].
pub(crate) async fn retry_bounded<T, F, Fut>(
    max_attempts: u32,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) => return Err(err),
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "provider attempt failed"
                );
                if attempt >= max_attempts {
                    return Err(ScraperError::Exhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
            }
        }
        attempt += 1;
    }
}
