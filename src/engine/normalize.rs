//! Text canonicalization shared by fingerprinting and similarity matching.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Query keys containing any of these fragments are tracking noise.
const TRACKING_PARAMS: &[&str] = &["utm_", "ref_", "source", "campaign"];

/// Canonicalize free text for comparison.
///
/// Lowercases, turns every character that is neither a word character nor
/// whitespace into a space, collapses whitespace runs and trims the ends.
///
/// ```ignore
/// assert_eq!(normalize("  Startup X raises $10M!  "), "startup x raises 10m");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Strip tracking parameters and the fragment from an article link.
///
/// Feeds tag the same story with different `utm_*` parameters depending on
/// where it was syndicated, which would otherwise defeat exact-duplicate
/// detection. Links that do not parse are returned untouched.
pub fn clean_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw.trim()) else {
        return raw.to_string();
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    parsed.set_fragment(None);
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept.iter());
    }
    parsed.to_string()
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_lowercase();
    TRACKING_PARAMS.iter().any(|t| key.contains(t))
}
