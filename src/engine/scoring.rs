//! Impact, virality and controversy scores.
//!
//! Every score lands in `[0, 100]`. Impact and controversy look at a single
//! article; virality is relative to the busiest article in the batch.

use super::rules::KeywordSet;
use crate::config::{ControversyConfig, ImpactCategory, ViralityConfig};
use crate::models::CanonicalArticle;

pub const MAX_SCORE: f64 = 100.0;

/// Clamp into `[0, 100]`; NaN becomes 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

/// Existence-based topical impact.
///
/// Each taxonomy category contributes its points once if any of its
/// keywords appears, regardless of how often.
#[derive(Debug, Clone)]
pub struct ImpactScorer {
    categories: Vec<(KeywordSet, f64)>,
}

impl ImpactScorer {
    pub fn new(taxonomy: &[ImpactCategory]) -> Self {
        Self {
            categories: taxonomy
                .iter()
                .map(|c| (KeywordSet::new(&c.keywords), c.score))
                .collect(),
        }
    }

    /// Score a lowercased `title + " " + text` haystack.
    pub fn score(&self, haystack: &str) -> f64 {
        let total: f64 = self
            .categories
            .iter()
            .filter(|(keywords, _)| keywords.any_in(haystack))
            .map(|(_, points)| points)
            .sum();
        clamp_score(total)
    }
}

#[derive(Debug, Clone)]
pub struct ControversyScorer {
    keywords: KeywordSet,
    per_hit: f64,
    cap: f64,
}

impl ControversyScorer {
    pub fn new(config: &ControversyConfig) -> Self {
        Self {
            keywords: KeywordSet::new(&config.keywords),
            per_hit: config.per_hit,
            cap: config.cap,
        }
    }

    /// `min(hits * per_hit, cap)`, where hits counts distinct keywords present.
    pub fn score(&self, haystack: &str) -> f64 {
        let hits = self.keywords.hits_in(haystack) as f64;
        clamp_score((hits * self.per_hit).min(self.cap))
    }
}

/// Raw engagement: primary metric plus a weighted share of the secondary one.
pub fn engagement(article: &CanonicalArticle, config: &ViralityConfig) -> f64 {
    article.engagement_primary + article.engagement_secondary * config.secondary_weight
}

/// Virality for every article, normalized against the batch maximum.
///
/// Returned in input order. With no positive engagement in the batch every
/// article scores 0; a lone article with any engagement scores 100.
pub fn virality_scores(articles: &[CanonicalArticle], config: &ViralityConfig) -> Vec<f64> {
    let engagements: Vec<f64> = articles.iter().map(|a| engagement(a, config)).collect();
    let max_engagement = engagements.iter().copied().fold(0.0_f64, f64::max);

    if max_engagement > 0.0 {
        engagements
            .into_iter()
            .map(|e| clamp_score(e / max_engagement * MAX_SCORE))
            .collect()
    } else {
        vec![0.0; engagements.len()]
    }
}
