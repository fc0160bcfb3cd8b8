//! Collapse a batch of raw reports into one canonical article per story.
//!
//! Reports are visited oldest first. An exact repeat (same fingerprint as a
//! story already created) is discarded outright. Otherwise the first
//! existing story whose title is similar enough absorbs the report's source.
//! Anything left becomes a new story.
//!
//! The scan is sequential and first-match-wins, so the outcome depends on
//! visit order. That order is fixed by the stable sort on `published_at`.

use super::fingerprint::fingerprint;
use super::similarity::similarity;
use crate::models::{CanonicalArticle, RawArticle};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Result of deduplicating one batch.
///
/// `canonical.len() + exact_duplicates + merged` always equals the number of
/// input reports.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub canonical: Vec<CanonicalArticle>,
    /// Reports dropped as exact repeats.
    pub exact_duplicates: usize,
    /// Reports folded into an earlier story's `sources`.
    pub merged: usize,
}

/// Deduplicate `articles` using `threshold` as the near-duplicate cut-off.
///
/// A report merges into a story only when the title similarity is strictly
/// greater than `threshold`.
#[instrument(level = "info", skip_all, fields(input = articles.len(), threshold = threshold))]
pub fn deduplicate(articles: &[RawArticle], threshold: f64) -> DedupOutcome {
    let mut ordered: Vec<&RawArticle> = articles.iter().collect();
    // Vec::sort_by is stable: equal timestamps keep arrival order.
    ordered.sort_by(|a, b| by_published_at(a, b));

    let mut seen_fingerprints: HashSet<String> = HashSet::new();
    let mut outcome = DedupOutcome::default();

    for article in ordered {
        let fp = fingerprint(&article.title, &article.url);
        if seen_fingerprints.contains(&fp) {
            debug!(title = %article.title, source = %article.source, "Exact duplicate discarded");
            outcome.exact_duplicates += 1;
            continue;
        }

        let matched = outcome
            .canonical
            .iter_mut()
            .find(|story| similarity(&article.title, &story.title) > threshold);

        match matched {
            Some(story) => {
                debug!(
                    title = %article.title,
                    into = %story.title,
                    source = %article.source,
                    "Near duplicate merged"
                );
                story.sources.push(article.source.clone());
                outcome.merged += 1;
            }
            None => {
                outcome.canonical.push(CanonicalArticle::from_raw(article));
                seen_fingerprints.insert(fp);
            }
        }
    }

    info!(
        canonical = outcome.canonical.len(),
        exact_duplicates = outcome.exact_duplicates,
        merged = outcome.merged,
        "Deduplication complete"
    );
    outcome
}

/// Oldest first; undated reports go after every dated one.
fn by_published_at(a: &RawArticle, b: &RawArticle) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
