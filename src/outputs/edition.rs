//! Turning a ranked batch into the edition for one date.

use crate::config::EditionConfig;
use crate::models::{DailyEdition, RankedArticle};
use crate::utils::truncate_for_log;
use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};

/// Number of stories echoed to the log after ranking.
const TOP_STORIES: usize = 5;

/// Keep the best `max_stories` of an already-ranked list.
///
/// Warns, but still publishes, when fewer than `min_stories` survive.
#[instrument(level = "info", skip_all, fields(%date, ranked = ranked.len()))]
pub fn build_edition(date: NaiveDate, mut ranked: Vec<RankedArticle>, config: &EditionConfig) -> DailyEdition {
    ranked.truncate(config.max_stories);
    if ranked.len() < config.min_stories {
        warn!(
            count = ranked.len(),
            min = config.min_stories,
            "Edition has fewer stories than the configured minimum"
        );
    }

    DailyEdition {
        date,
        generated_at: Utc::now(),
        total_articles: ranked.len(),
        articles: ranked,
    }
}

/// Log rank, score and title of the leading stories.
pub fn log_top_stories(edition: &DailyEdition) {
    for (i, story) in edition.articles.iter().take(TOP_STORIES).enumerate() {
        info!(
            rank = i + 1,
            score = story.scores.final_score,
            category = %story.article.category,
            sources = story.article.sources.len(),
            title = %truncate_for_log(&story.article.title, 80),
            "Top story"
        );
    }
}
