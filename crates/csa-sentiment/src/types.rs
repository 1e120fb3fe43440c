use serde::Serialize;

/// Username reported when no record identifies a person.
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Identity of the analyzed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostInfo {
    /// Post author, or [`UNKNOWN_USERNAME`] if no record names one.
    pub username: String,
    /// Identifier segment of the post URL (`/p/<shortcode>` or `/reel/<shortcode>`).
    pub shortcode: String,
}

/// A viewer comment with non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub username: String,
    pub text: String,
}

/// Raw output of a polarity scorer.
///
/// `compound` is in `[-1.0, 1.0]`; `pos`, `neg` and `neu` are proportions in
/// `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A comment together with its polarity scores and class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredComment {
    pub username: String,
    pub text: String,
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub sentiment: Sentiment,
}

/// Qualitative band of the mean compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentStrength {
    #[serde(rename = "Strongly Positive")]
    StronglyPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "Strongly Negative")]
    StronglyNegative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        })
    }
}

impl std::fmt::Display for SentimentStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SentimentStrength::StronglyPositive => "Strongly Positive",
            SentimentStrength::Positive => "Positive",
            SentimentStrength::Neutral => "Neutral",
            SentimentStrength::Negative => "Negative",
            SentimentStrength::StronglyNegative => "Strongly Negative",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentStats {
    pub total_comments: usize,
    pub avg_sentiment: f64,
    pub sentiment_strength: SentimentStrength,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlights {
    pub most_positive: ScoredComment,
    pub most_negative: ScoredComment,
}

/// Aggregate sentiment for one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub post_info: PostInfo,
    pub stats: SentimentStats,
    pub highlights: Highlights,
    /// Every scored comment, in provider order.
    pub comments: Vec<ScoredComment>,
}
