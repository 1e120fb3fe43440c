//! Comment scoring: each comment gets polarity scores and a class.

use crate::types::{Comment, PolarityScores, ScoredComment, Sentiment};

/// Compound score at or above which a comment is positive; its negation is
/// the (inclusive) negative threshold.
pub const CLASSIFICATION_THRESHOLD: f64 = 0.05;

/// A pure text → polarity function.
///
/// Implementations hold no per-call state and may be shared across
/// concurrently running pipelines.
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

/// Classifies a compound score; both thresholds are inclusive.
#[must_use]
pub fn classify(compound: f64) -> Sentiment {
    if compound >= CLASSIFICATION_THRESHOLD {
        Sentiment::Positive
    } else if compound <= -CLASSIFICATION_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Scores every comment in order. Comments with empty text are dropped.
pub fn score_comments<P>(scorer: &P, comments: Vec<Comment>) -> Vec<ScoredComment>
where
    P: PolarityScorer + ?Sized,
{
    comments
        .into_iter()
        .filter(|c| !c.text.is_empty())
        .map(|Comment { username, text }| {
            let scores = scorer.polarity_scores(&text);
            ScoredComment {
                username,
                text,
                compound: scores.compound,
                positive: scores.pos,
                negative: scores.neg,
                neutral: scores.neu,
                sentiment: classify(scores.compound),
            }
        })
        .collect()
}
