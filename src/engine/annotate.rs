//! Display metadata: content tags and the templated summary.

use super::rules::KeywordSet;
use crate::config::{SummaryConfig, TagRule};
use crate::models::{CanonicalArticle, Category};
use itertools::Itertools;

/// Attaches the category plus any matching content tags.
#[derive(Debug, Clone)]
pub struct Tagger {
    rules: Vec<(String, KeywordSet)>,
}

impl Tagger {
    pub fn new(rules: &[TagRule]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|r| (r.tag.clone(), KeywordSet::new(&r.keywords)))
                .collect(),
        }
    }

    /// Category first, then matching rule tags in definition order, without
    /// duplicates.
    pub fn tags(&self, category: Category, haystack: &str) -> Vec<String> {
        std::iter::once(category.to_string())
            .chain(
                self.rules
                    .iter()
                    .filter(|(_, keywords)| keywords.any_in(haystack))
                    .map(|(tag, _)| tag.clone()),
            )
            .unique()
            .collect()
    }
}

/// Builds the two-to-three sentence templated summary.
///
/// The "what happened" sentence is picked from the title alone, testing the
/// rules strictly in configured order, since a headline can match several.
#[derive(Debug, Clone)]
pub struct Summarizer {
    rules: Vec<(KeywordSet, String)>,
    fallback: String,
    india_context: String,
    global_context: String,
    filler: String,
}

impl Summarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            rules: config
                .rules
                .iter()
                .map(|r| (KeywordSet::new(&r.keywords), r.sentence.clone()))
                .collect(),
            fallback: config.fallback.clone(),
            india_context: config.india_context.clone(),
            global_context: config.global_context.clone(),
            filler: config.filler.clone(),
        }
    }

    pub fn summarize(&self, article: &CanonicalArticle) -> String {
        let title = article.title.to_lowercase();
        let mut parts: Vec<&str> = Vec::with_capacity(3);

        let what = self
            .rules
            .iter()
            .find(|(keywords, _)| keywords.any_in(&title))
            .map(|(_, sentence)| sentence.as_str())
            .unwrap_or(&self.fallback);
        parts.push(what);

        parts.push(match article.category {
            Category::India => &self.india_context,
            Category::Global => &self.global_context,
        });

        if parts.len() < 3 {
            parts.push(&self.filler);
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::rules::haystack;
    use crate::models::RawArticle;

    fn story(title: &str, text: &str, category: Category) -> CanonicalArticle {
        CanonicalArticle::from_raw(&RawArticle {
            title: title.to_string(),
            text: Some(text.to_string()),
            category,
            source: "Test".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_tags_category_first_then_rule_order() {
        let tagger = Tagger::new(&EngineConfig::default().tag_rules);
        let hay = haystack(
            "Security breach follows funding round",
            "The company will launch a fix",
        );
        assert_eq!(
            tagger.tags(Category::India, &hay),
            vec!["india", "funding", "product", "security"]
        );
    }

    #[test]
    fn test_tags_only_category_when_nothing_matches() {
        let tagger = Tagger::new(&EngineConfig::default().tag_rules);
        assert_eq!(
            tagger.tags(Category::Global, &haystack("Quiet day", "")),
            vec!["global"]
        );
    }

    #[test]
    fn test_tags_are_unique() {
        let rules = vec![
            TagRule::new("global", &["chip"]),
            TagRule::new("hardware", &["chip"]),
            TagRule::new("hardware", &["silicon"]),
        ];
        let tagger = Tagger::new(&rules);
        assert_eq!(
            tagger.tags(Category::Global, &haystack("New chip on silicon", "")),
            vec!["global", "hardware"]
        );
    }

    #[test]
    fn test_summary_funding_beats_acquisition() {
        let summarizer = Summarizer::new(&SummaryConfig::default());
        let summary = summarizer.summarize(&story(
            "Flipkart to acquire startup after it raises new funding",
            "",
            Category::India,
        ));
        assert_eq!(
            summary,
            "A funding round was announced. \
             This development has implications for the Indian startup ecosystem. \
             The story has attracted significant attention from the tech community."
        );
    }

    #[test]
    fn test_summary_layoffs_global() {
        let summarizer = Summarizer::new(&SummaryConfig::default());
        let summary = summarizer.summarize(&story("Big Tech layoff wave continues", "", Category::Global));
        assert!(summary.starts_with("Layoffs or job cuts were announced."));
        assert!(summary.contains("global implications for the tech industry"));
    }

    #[test]
    fn test_summary_uses_title_not_body() {
        let summarizer = Summarizer::new(&SummaryConfig::default());
        let summary = summarizer.summarize(&story(
            "Quarterly results are in",
            "The firm plans to launch a funding push",
            Category::Global,
        ));
        assert!(summary.starts_with("A significant development was reported."));
    }

    #[test]
    fn test_summary_has_three_sentences() {
        let summarizer = Summarizer::new(&SummaryConfig::default());
        let summary = summarizer.summarize(&story("New beta released", "", Category::Global));
        assert_eq!(summary.matches(". ").count(), 2);
        assert!(summary.starts_with("A new product or service was launched."));
    }
}
