//! Comment sentiment pipeline.
//!
//! Turns the scraper's loosely-typed record list into a clean comment set,
//! scores each comment with a polarity scorer, and reduces the scores into a
//! per-post [`Summary`]. Stages run strictly in order:
//! extract → score → summarize.

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod types;

mod record;

pub use aggregate::{sentiment_strength, summarize};
pub use error::{NoDataError, SentimentError};
pub use extract::{extract, normalize_records, parse_shortcode};
pub use lexicon::LexiconScorer;
pub use pipeline::analyze_post;
pub use scorer::{classify, score_comments, PolarityScorer};
pub use types::{
    Comment, Highlights, PolarityScores, PostInfo, ScoredComment, Sentiment, SentimentStats,
    SentimentStrength, Summary,
};
