//! The deduplication and ranking engine.
//!
//! # Pipeline
//!
//! ```text
//! RawArticle[] ──dedup──▶ CanonicalArticle[] ──score──▶ ScoreSet[]
//!                                                        │
//!                 RankedArticle[] ◀──tag/summarize── stable sort
//! ```
//!
//! # Submodules
//!
//! - [`normalize`]: text canonicalization and URL cleaning
//! - [`fingerprint`]: exact-duplicate digests
//! - [`similarity`]: LCS-based title similarity
//! - [`dedup`]: batch deduplication
//! - [`rules`]: keyword matching shared by everything below
//! - [`scoring`]: impact, virality and controversy
//! - [`rank`]: weighted aggregation and ordering
//! - [`annotate`]: tags and templated summaries
//!
//! Every stage is a pure function of its input batch and the immutable
//! [`EngineConfig`]; running the engine twice on the same input yields the
//! same output.

pub mod annotate;
pub mod dedup;
pub mod fingerprint;
pub mod normalize;
pub mod rank;
pub mod rules;
pub mod scoring;
pub mod similarity;

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::models::{RankedArticle, RawArticle};
use annotate::{Summarizer, Tagger};
use scoring::{ControversyScorer, ImpactScorer};
use tracing::{debug, info, instrument};

/// A validated, ready-to-run ranking engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    impact: ImpactScorer,
    controversy: ControversyScorer,
    tagger: Tagger,
    summarizer: Summarizer,
}

impl Engine {
    /// Build an engine, checking the configuration once up front.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the ranking weights do not sum to 1.0,
    /// a weight is negative, or the similarity threshold is out of range.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            impact: ImpactScorer::new(&config.impact_taxonomy),
            controversy: ControversyScorer::new(&config.controversy),
            tagger: Tagger::new(&config.tag_rules),
            summarizer: Summarizer::new(&config.summary),
            config,
        })
    }

    /// Deduplicate, score, rank and annotate one batch.
    ///
    /// An empty batch yields an empty list.
    #[instrument(level = "info", skip_all, fields(input = articles.len()))]
    pub fn process(&self, articles: &[RawArticle]) -> Vec<RankedArticle> {
        let outcome = dedup::deduplicate(articles, self.config.similarity_threshold);
        let canonical = outcome.canonical;
        if canonical.is_empty() {
            info!("Nothing to rank");
            return Vec::new();
        }

        let virality = scoring::virality_scores(&canonical, &self.config.virality);

        let ranked: Vec<RankedArticle> = canonical
            .into_iter()
            .zip(virality)
            .map(|(article, virality)| {
                let hay = rules::haystack(&article.title, &article.text);
                let scores = rank::score_set(
                    &self.config.weights,
                    virality,
                    self.impact.score(&hay),
                    self.controversy.score(&hay),
                );
                debug!(
                    title = %article.title,
                    virality = scores.virality,
                    impact = scores.impact,
                    controversy = scores.controversy,
                    final_score = scores.final_score,
                    "Scored article"
                );
                RankedArticle {
                    tags: self.tagger.tags(article.category, &hay),
                    summary: self.summarizer.summarize(&article),
                    scores,
                    article,
                }
            })
            .collect();

        let ranked = rank::sort_by_final(ranked);
        info!(ranked = ranked.len(), "Ranking complete");
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingWeights;
    use crate::models::{Category, ScoreSet};
    use chrono::{TimeZone, Utc};

    fn report(
        title: &str,
        url: &str,
        source: &str,
        hour: u32,
        score: f64,
        comments: f64,
    ) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            url: url.to_string(),
            source: source.to_string(),
            source_id: source.to_lowercase(),
            published_at: Some(Utc.with_ymd_and_hms(2025, 5, 6, hour, 0, 0).unwrap()),
            engagement_primary: Some(score),
            engagement_secondary: Some(comments),
            ..Default::default()
        }
    }

    fn batch() -> Vec<RawArticle> {
        vec![
            report("Startup X raises $10M", "https://techcrunch.com/x", "TechCrunch", 8, 100.0, 10.0),
            report("Startup X raises $10 million", "https://crunchbase.com/x", "Crunchbase News", 9, 400.0, 0.0),
            report("Startup X raises $10M", "https://techcrunch.com/x", "TechCrunch", 10, 0.0, 0.0),
            RawArticle {
                category: Category::India,
                text: Some("Protest and lawsuit follow the new policy".to_string()),
                ..report("Delhi regulator drafts data rules", "https://livemint.com/d", "Livemint", 11, 50.0, 5.0)
            },
            report("Quiet weekly roundup", "https://wired.com/w", "Wired", 12, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut config = EngineConfig::default();
        config.weights = RankingWeights {
            virality: 0.6,
            impact: 0.6,
            controversy: 0.0,
        };
        assert!(matches!(
            Engine::new(config),
            Err(ConfigError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_empty_batch() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert!(engine.process(&[]).is_empty());
    }

    #[test]
    fn test_pipeline_dedups_and_scores() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let ranked = engine.process(&batch());

        assert_eq!(ranked.len(), 3);
        let x = ranked
            .iter()
            .find(|r| r.article.title == "Startup X raises $10M")
            .unwrap();
        assert_eq!(
            x.article.sources,
            vec!["TechCrunch".to_string(), "Crunchbase News".to_string()]
        );
        // Engagement comes from the first-seen report (100 + 10 * 0.1).
        assert!((x.scores.virality - 100.0).abs() < 1e-9);
        assert_eq!(x.tags[0], "global");
        assert!(x.tags.contains(&"funding".to_string()));
    }

    #[test]
    fn test_scores_bounded_and_final_matches_formula() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let w = RankingWeights::default();
        for r in engine.process(&batch()) {
            let s = r.scores;
            for v in [s.virality, s.impact, s.controversy, s.final_score] {
                assert!((0.0..=100.0).contains(&v), "score out of range: {v}");
            }
            let expected = w.virality * s.virality + w.impact * s.impact + w.controversy * s.controversy;
            assert!((s.final_score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_output_sorted_descending() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let ranked = engine.process(&batch());
        assert!(ranked
            .windows(2)
            .all(|w| w[0].scores.final_score >= w[1].scores.final_score));
        assert_eq!(ranked.last().unwrap().article.title, "Quiet weekly roundup");
    }

    #[test]
    fn test_india_article_annotations() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let ranked = engine.process(&batch());
        let delhi = ranked
            .iter()
            .find(|r| r.article.category == Category::India)
            .unwrap();
        assert_eq!(delhi.tags, vec!["india".to_string(), "policy".to_string()]);
        assert_eq!(delhi.scores.controversy, 40.0);
        assert!(delhi.summary.contains("Indian startup ecosystem"));
    }

    #[test]
    fn test_deterministic() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let first = engine.process(&batch());
        let second = engine.process(&batch());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_fields_do_not_fail() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let ranked = engine.process(&[RawArticle::default(), RawArticle::default()]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].scores, ScoreSet::default());
        assert_eq!(ranked[0].tags, vec!["global".to_string()]);
    }
}
