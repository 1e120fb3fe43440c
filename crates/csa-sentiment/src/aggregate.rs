//! Reduction of scored comments into a per-post [`Summary`].

use crate::error::NoDataError;
use crate::types::{
    Highlights, PostInfo, ScoredComment, Sentiment, SentimentStats, SentimentStrength, Summary,
};

/// Bands the mean compound score. Bands are strict and checked in order.
#[must_use]
pub fn sentiment_strength(avg_sentiment: f64) -> SentimentStrength {
    if avg_sentiment > 0.15 {
        SentimentStrength::StronglyPositive
    } else if avg_sentiment > 0.05 {
        SentimentStrength::Positive
    } else if avg_sentiment < -0.15 {
        SentimentStrength::StronglyNegative
    } else if avg_sentiment < -0.05 {
        SentimentStrength::Negative
    } else {
        SentimentStrength::Neutral
    }
}

/// Summarizes scored comments for a post.
///
/// Percentages and the mean keep full `f64` precision.
///
/// # Errors
///
/// Returns [`NoDataError`] when `scored` is empty.
pub fn summarize(post_info: PostInfo, scored: Vec<ScoredComment>) -> Result<Summary, NoDataError> {
    let (Some(most_positive), Some(most_negative)) = (
        first_extreme(&scored, |candidate, best| candidate > best),
        first_extreme(&scored, |candidate, best| candidate < best),
    ) else {
        return Err(NoDataError);
    };
    let highlights = Highlights {
        most_positive: most_positive.clone(),
        most_negative: most_negative.clone(),
    };

    let total = scored.len();
    let count_of = |class: Sentiment| scored.iter().filter(|s| s.sentiment == class).count();
    let positive_count = count_of(Sentiment::Positive);
    let negative_count = count_of(Sentiment::Negative);
    let neutral_count = count_of(Sentiment::Neutral);

    #[allow(clippy::cast_precision_loss)]
    let denom = total as f64;
    let avg_sentiment = scored.iter().map(|s| s.compound).sum::<f64>() / denom;

    let stats = SentimentStats {
        total_comments: total,
        avg_sentiment,
        sentiment_strength: sentiment_strength(avg_sentiment),
        positive_count,
        negative_count,
        neutral_count,
        positive_pct: percentage(positive_count, total),
        negative_pct: percentage(negative_count, total),
        neutral_pct: percentage(neutral_count, total),
    };

    tracing::info!(
        shortcode = %post_info.shortcode,
        total,
        avg_sentiment,
        strength = %stats.sentiment_strength,
        "summarized comment sentiment"
    );

    Ok(Summary {
        post_info,
        stats,
        highlights,
        comments: scored,
    })
}

/// First element whose compound beats every earlier one under `beats`.
///
/// Later ties never replace the current pick.
fn first_extreme(
    scored: &[ScoredComment],
    beats: impl Fn(f64, f64) -> bool,
) -> Option<&ScoredComment> {
    scored.iter().fold(None, |best, candidate| match best {
        Some(current) if !beats(candidate.compound, current.compound) => Some(current),
        _ => Some(candidate),
    })
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = 100.0 * count as f64 / total as f64;
    pct
}
