//! Weighted aggregation and the final ordering.

use super::scoring::clamp_score;
use crate::config::RankingWeights;
use crate::models::{RankedArticle, ScoreSet};

/// Combine the three component scores with the configured weights.
pub fn score_set(weights: &RankingWeights, virality: f64, impact: f64, controversy: f64) -> ScoreSet {
    let final_score = weights.virality * virality
        + weights.impact * impact
        + weights.controversy * controversy;
    ScoreSet {
        virality,
        impact,
        controversy,
        final_score: clamp_score(final_score),
    }
}

/// Order by final score, highest first.
///
/// `sort_by` is stable, so equal scores keep their incoming (post-dedup)
/// order.
pub fn sort_by_final(mut articles: Vec<RankedArticle>) -> Vec<RankedArticle> {
    articles.sort_by(|a, b| b.scores.final_score.total_cmp(&a.scores.final_score));
    articles
}
