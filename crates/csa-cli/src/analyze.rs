//! `analyze` command: fetch, score, and report on one post.

use csa_core::AppConfig;
use csa_scraper::{ApifyClient, FetchLimits};
use csa_sentiment::{analyze_post, LexiconScorer, ScoredComment, Summary};

/// Comment text longer than this is cut in the table view.
const TEXT_COLUMN_WIDTH: usize = 60;

/// Run the pipeline for `post_url` and print the result to stdout.
///
/// # Errors
///
/// Returns an error if the provider client cannot be built or the pipeline
/// fails (invalid URL, provider failure, empty dataset, or no comments).
pub(crate) async fn run_analyze(
    config: &AppConfig,
    post_url: &str,
    limits: FetchLimits,
    json: bool,
) -> anyhow::Result<()> {
    let source = ApifyClient::from_config(config)?;
    let scorer = LexiconScorer::new();

    tracing::info!(
        post_url = %post_url,
        max_comments = limits.max_comments,
        max_pages = limits.max_pages,
        "analyzing post"
    );
    let summary = analyze_post(&source, &scorer, post_url, limits).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_report(&summary));
    }
    Ok(())
}

/// Human-readable report: header, stats, highlights, then one row per comment.
pub(crate) fn render_report(summary: &Summary) -> String {
    let stats = &summary.stats;
    let mut out = String::new();

    out.push_str(&format!(
        "post {} by @{}\n",
        summary.post_info.shortcode, summary.post_info.username
    ));
    out.push_str(&format!(
        "{} comments, average {:.4} ({})\n",
        stats.total_comments, stats.avg_sentiment, stats.sentiment_strength
    ));
    out.push_str(&format!(
        "positive {} ({:.1}%)  negative {} ({:.1}%)  neutral {} ({:.1}%)\n\n",
        stats.positive_count,
        stats.positive_pct,
        stats.negative_count,
        stats.negative_pct,
        stats.neutral_count,
        stats.neutral_pct
    ));
    out.push_str(&highlight_line("most positive", &summary.highlights.most_positive));
    out.push_str(&highlight_line("most negative", &summary.highlights.most_negative));
    out.push('\n');

    out.push_str(&format!("{:<25}{:<10}{:<10}TEXT\n", "USER", "SCORE", "LABEL"));
    for comment in &summary.comments {
        out.push_str(&format!(
            "{:<25}{:<10.4}{:<10}{}\n",
            comment.username,
            comment.compound,
            comment.sentiment,
            clip(&comment.text, TEXT_COLUMN_WIDTH)
        ));
    }
    out
}

fn highlight_line(label: &str, comment: &ScoredComment) -> String {
    format!(
        "{label}: @{} ({:.4}) {}\n",
        comment.username,
        comment.compound,
        clip(&comment.text, TEXT_COLUMN_WIDTH)
    )
}

/// Single-line form of `text`, cut to `width` chars with a trailing ellipsis.
fn clip(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
