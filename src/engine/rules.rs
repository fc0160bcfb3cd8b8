//! Declarative keyword matching used by the scorers, tagger and summarizer.
//!
//! Matching is a case-insensitive substring test, so a short keyword such as
//! `"ai"` also hits inside `"raises"`. That is a known heuristic limitation
//! of the taxonomy and is left as is.

/// An ordered list of lowercased keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether any keyword occurs in `haystack`.
    ///
    /// `haystack` must already be lowercased, see [`haystack`].
    pub fn any_in(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }

    /// Number of distinct keywords that occur in `haystack`, each counted once
    /// however often it appears.
    pub fn hits_in(&self, haystack: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| haystack.contains(k.as_str()))
            .count()
    }
}

/// The lowercased `title + " " + text` that every rule is matched against.
pub fn haystack(title: &str, text: &str) -> String {
    format!("{title} {text}").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_in_is_case_insensitive() {
        let set = KeywordSet::new(["Funding", "raise"]);
        assert!(set.any_in(&haystack("Zepto RAISES $200M", "")));
        assert!(!set.any_in(&haystack("Zepto opens new store", "")));
    }

    #[test]
    fn test_substring_heuristic_matches_inside_words() {
        let set = KeywordSet::new(["ai"]);
        assert!(set.any_in(&haystack("Startup raises money", "")));
    }

    #[test]
    fn test_hits_counts_distinct_keywords_once() {
        let set = KeywordSet::new(["lawsuit", "protest", "boycott"]);
        let text = haystack("Lawsuit after lawsuit", "protest, protest, protest");
        assert_eq!(set.hits_in(&text), 2);
    }

    #[test]
    fn test_empty_keywords_are_ignored() {
        let set = KeywordSet::new(["", "hack"]);
        assert!(!set.any_in(&haystack("quiet day", "")));
        assert_eq!(set.hits_in(&haystack("hack", "")), 1);
    }
}
