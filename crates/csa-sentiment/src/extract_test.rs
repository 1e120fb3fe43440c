use std::sync::atomic::{AtomicU32, Ordering};

use csa_scraper::ScraperError;
use serde_json::json;

use super::*;

const POST_URL: &str = "https://www.instagram.com/p/Cxyz123/";

/// In-memory `CommentSource` that counts calls.
struct FakeSource {
    records: Option<Vec<Value>>,
    calls: AtomicU32,
}

impl FakeSource {
    fn returning(records: Vec<Value>) -> Self {
        Self {
            records: Some(records),
            calls: AtomicU32::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            records: None,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommentSource for FakeSource {
    async fn fetch_records(
        &self,
        _post_url: &str,
        _limits: FetchLimits,
    ) -> Result<Vec<Value>, ScraperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.records {
            Some(records) => Ok(records.clone()),
            None => Err(ScraperError::Exhausted {
                attempts: 3,
                source: Box::new(ScraperError::UnexpectedStatus {
                    status: 504,
                    body: "timeout".to_owned(),
                }),
            }),
        }
    }
}

fn normalize(records: &[Value]) -> (PostInfo, Vec<Comment>) {
    normalize_records("abc".to_owned(), records).expect("expected normalized records")
}

fn comment(username: &str, text: &str) -> Comment {
    Comment {
        username: username.to_owned(),
        text: text.to_owned(),
    }
}

// -----------------------------------------------------------------------
// parse_shortcode
// -----------------------------------------------------------------------

#[test]
fn parse_shortcode_post_url() {
    assert_eq!(
        parse_shortcode("https://www.instagram.com/p/Cxyz123/").unwrap(),
        "Cxyz123"
    );
}

#[test]
fn parse_shortcode_reel_url_with_query() {
    assert_eq!(
        parse_shortcode("https://instagram.com/reel/DA1b2C3?igsh=abc").unwrap(),
        "DA1b2C3"
    );
}

#[test]
fn parse_shortcode_rejects_profile_and_foreign_urls() {
    for url in [
        "https://www.instagram.com/someuser/",
        "https://www.instagram.com/p/",
        "https://example.com/p/abc",
        "not a url",
        "",
    ] {
        let err = parse_shortcode(url).unwrap_err();
        assert!(
            matches!(err, SentimentError::InvalidUrl(ref u) if u == url),
            "expected InvalidUrl for {url:?}, got {err:?}"
        );
    }
}

// -----------------------------------------------------------------------
// extract
// -----------------------------------------------------------------------

#[tokio::test]
async fn extract_rejects_invalid_url_without_calling_source() {
    let source = FakeSource::returning(vec![json!({"text": "hi"})]);
    let result = extract(&source, "https://www.instagram.com/stories/x/1", FetchLimits::default()).await;
    assert!(matches!(result, Err(SentimentError::InvalidUrl(_))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn extract_maps_source_failure_to_provider_unavailable() {
    let source = FakeSource::failing();
    let result = extract(&source, POST_URL, FetchLimits::default()).await;
    match result {
        Err(SentimentError::ProviderUnavailable(detail)) => {
            assert!(detail.contains("504"), "detail: {detail}");
        }
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn extract_reports_empty_response() {
    let source = FakeSource::returning(vec![]);
    let result = extract(&source, POST_URL, FetchLimits::default()).await;
    assert!(matches!(result, Err(SentimentError::EmptyResponse)));
}

#[tokio::test]
async fn extract_returns_shortcode_author_and_comments() {
    let source = FakeSource::returning(vec![
        json!({"ownerUsername": "author", "isCaption": true, "isPostAuthor": true, "text": "caption"}),
        json!({"ownerUsername": "a", "text": "love it"}),
    ]);
    let (post, comments) = extract(&source, POST_URL, FetchLimits::default())
        .await
        .expect("expected extraction");
    assert_eq!(
        post,
        PostInfo {
            username: "author".into(),
            shortcode: "Cxyz123".into()
        }
    );
    assert_eq!(comments, vec![comment("a", "love it")]);
}

// -----------------------------------------------------------------------
// comment collection
// -----------------------------------------------------------------------

#[test]
fn comments_keep_provider_order_across_field_variants() {
    let (_, comments) = normalize(&[
        json!({"ownerUsername": "a", "text": "hi"}),
        json!({"commentText": "bye", "ownerUsername": "b"}),
    ]);
    assert_eq!(comments, vec![comment("a", "hi"), comment("b", "bye")]);
}

#[test]
fn caption_never_counts_as_comment() {
    let (_, comments) = normalize(&[
        json!({"ownerUsername": "brand", "text": "our caption", "isCaption": true}),
        json!({"ownerUsername": "fan", "text": "nice"}),
    ]);
    assert_eq!(comments, vec![comment("fan", "nice")]);
}

#[test]
fn records_without_text_are_skipped() {
    let (_, comments) = normalize(&[
        json!({"postData": {"ownerUsername": "brand"}}),
        json!({"ownerUsername": "ghost"}),
        json!(null),
        json!({"username": "c", "commentText": "third"}),
    ]);
    assert_eq!(comments, vec![comment("c", "third")]);
}

#[test]
fn only_caption_and_metadata_yields_no_comments() {
    let (post, comments) = normalize(&[
        json!({"postData": {"ownerUsername": "brand"}}),
        json!({"ownerUsername": "brand", "text": "caption", "isCaption": true}),
    ]);
    assert_eq!(post.username, "brand");
    assert!(comments.is_empty());
}

// -----------------------------------------------------------------------
// author resolution
// -----------------------------------------------------------------------

#[test]
fn post_data_beats_later_post_author_flag() {
    let (post, _) = normalize(&[
        json!({"postData": {"ownerUsername": "x"}}),
        json!({"isPostAuthor": true, "isVerified": true, "ownerUsername": "y"}),
    ]);
    assert_eq!(post.username, "x");
}

#[test]
fn post_data_beats_earlier_post_author_flag() {
    let (post, _) = normalize(&[
        json!({"isPostAuthor": true, "isVerified": true, "ownerUsername": "y"}),
        json!({"postInfo": {"owner": {"username": "x"}}}),
    ]);
    assert_eq!(post.username, "x");
}

#[test]
fn empty_post_data_ends_search_at_first_record() {
    let (post, _) = normalize(&[
        json!({"postData": {}, "ownerUsername": "first"}),
        json!({"postData": {"ownerUsername": "later"}}),
    ]);
    assert_eq!(post.username, "first");
}

#[test]
fn unusable_post_data_skips_post_author_search() {
    let (post, _) = normalize(&[
        json!({"ownerUsername": "fan", "text": "hi"}),
        json!({"postData": null}),
        json!({"isPostAuthor": true, "isVerified": true, "ownerUsername": "brand"}),
    ]);
    assert_eq!(post.username, "fan");
}

#[test]
fn unusable_post_data_with_unnamed_first_record_uses_flagged_scan() {
    let (post, _) = normalize(&[
        json!({"text": "anonymous"}),
        json!({"postInfo": "not an object"}),
        json!({"isCaption": true, "ownerUsername": "brand"}),
    ]);
    assert_eq!(post.username, "brand");
}

#[test]
fn verified_post_author_used_without_post_data() {
    let (post, _) = normalize(&[
        json!({"ownerUsername": "fan", "text": "first!"}),
        json!({"isPostAuthor": true, "isVerified": true, "ownerUsername": "brand"}),
    ]);
    assert_eq!(post.username, "brand");
}

#[test]
fn post_author_caption_read_through_nested_owner() {
    let (post, _) = normalize(&[
        json!({"ownerUsername": "fan", "text": "first!"}),
        json!({"isPostAuthor": true, "isCaption": true, "owner": {"username": "brand"}}),
    ]);
    assert_eq!(post.username, "brand");
}

#[test]
fn unverified_post_author_alone_falls_back_to_first_record() {
    let (post, _) = normalize(&[
        json!({"ownerUsername": "fan", "text": "first!"}),
        json!({"isPostAuthor": true, "ownerUsername": "brand", "text": "thanks"}),
    ]);
    assert_eq!(post.username, "fan");
}

#[test]
fn first_record_nested_owner_is_used_as_fallback() {
    let (post, _) = normalize(&[
        json!({"owner": {"username": "nested-first"}, "text": "hey"}),
        json!({"ownerUsername": "other", "text": "yo"}),
    ]);
    assert_eq!(post.username, "nested-first");
}

#[test]
fn flagged_record_scan_used_when_chosen_source_has_no_username() {
    let (post, _) = normalize(&[
        json!({"postData": {"likes": 10}}),
        json!({"isCaption": true, "ownerUsername": "brand", "text": "caption"}),
    ]);
    assert_eq!(post.username, "brand");
}

#[test]
fn flagged_scan_skips_flagged_records_without_owner_username() {
    let (post, _) = normalize(&[
        json!({"postData": {"likes": 10}}),
        json!({"isPostAuthor": true, "owner": {"username": "nested-only"}}),
        json!({"isCaption": true, "ownerUsername": "brand"}),
    ]);
    assert_eq!(post.username, "brand");
}

#[test]
fn unknown_when_no_record_names_anyone() {
    let (post, comments) = normalize(&[
        json!({"text": "anonymous"}),
        json!({"commentText": "also anonymous"}),
    ]);
    assert_eq!(post.username, UNKNOWN_USERNAME);
    assert_eq!(
        comments,
        vec![
            comment(UNKNOWN_USERNAME, "anonymous"),
            comment(UNKNOWN_USERNAME, "also anonymous")
        ]
    );
}

#[test]
fn empty_records_are_an_error() {
    let result = normalize_records("abc".to_owned(), &[]);
    assert!(matches!(result, Err(SentimentError::EmptyResponse)));
}
