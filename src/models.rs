//! Data models for raw, canonical and ranked news articles.
//!
//! This module defines the records that flow through the ranking pipeline:
//! - [`RawArticle`]: one record as produced by a scraper, never mutated
//! - [`CanonicalArticle`]: one story after deduplication, possibly reported by many sources
//! - [`ScoreSet`]: the bounded scores computed for a canonical article
//! - [`RankedArticle`]: the terminal artifact handed to persistence and rendering
//! - [`DailyEdition`]: the ranked list for one publication date
//!
//! Every stage consumes one collection and produces a new one; nothing here
//! is mutated across stage boundaries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Timestamp layouts accepted when the feed omits a UTC offset.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Editorial bucket a source belongs to.
///
/// Deserialization is case-insensitive; anything other than `india`,
/// including `null`, is [`Category::Global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Indian startup and tech outlets.
    India,
    /// Everything else.
    #[default]
    Global,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::India => "india",
            Category::Global => "global",
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("india") => Category::India,
            _ => Category::Global,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw news article as handed over by a scraper.
///
/// Scrapers are lossy, so every field is optional on the wire. Absent or
/// `null` strings deserialize to `""`, an absent or unknown category to
/// [`Category::Global`]. Timestamps without an offset are read as UTC;
/// unparseable timestamps and non-numeric engagement become `None`.
///
/// Reddit-backed scrapers emit `reddit_score` / `reddit_comments`; those
/// keys are accepted as aliases for the engagement fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawArticle {
    /// The headline.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Link to the story.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Publication instant, when the feed carried one.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    /// Human-readable outlet name, e.g. `"TechCrunch"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    /// Stable outlet identifier, e.g. `"techcrunch"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_id: String,
    #[serde(default)]
    pub category: Category,
    /// Extracted body text.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub byline: Option<String>,
    /// Primary engagement signal (upvotes / score).
    #[serde(default, alias = "reddit_score", deserialize_with = "lenient_number")]
    pub engagement_primary: Option<f64>,
    /// Secondary engagement signal (comment count).
    #[serde(default, alias = "reddit_comments", deserialize_with = "lenient_number")]
    pub engagement_secondary: Option<f64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

/// RFC 3339 first, then offset-less ISO layouts taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A single story after deduplication.
///
/// `url`, `text`, `byline` and the engagement figures come from the
/// first-seen (earliest) report. `sources` lists every outlet that carried
/// the story, in the order they were encountered, and is never empty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanonicalArticle {
    pub title: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Category,
    pub sources: Vec<String>,
    pub text: String,
    pub byline: String,
    pub engagement_primary: f64,
    pub engagement_secondary: f64,
}

impl CanonicalArticle {
    /// Seed a canonical story from its first-seen report.
    pub fn from_raw(raw: &RawArticle) -> Self {
        Self {
            title: raw.title.clone(),
            url: raw.url.clone(),
            published_at: raw.published_at,
            category: raw.category,
            sources: vec![raw.source.clone()],
            text: raw.text.clone().unwrap_or_default(),
            byline: raw.byline.clone().unwrap_or_default(),
            engagement_primary: finite_or_zero(raw.engagement_primary),
            engagement_secondary: finite_or_zero(raw.engagement_secondary),
        }
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Scores for one canonical article, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct ScoreSet {
    pub virality: f64,
    pub impact: f64,
    pub controversy: f64,
    /// Weighted combination of the other three.
    #[serde(rename = "final")]
    pub final_score: f64,
}

/// A canonical article with its scores and display metadata attached.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: CanonicalArticle,
    pub scores: ScoreSet,
    /// Templated two-to-three sentence summary.
    pub summary: String,
    /// Category first, then content tags in rule order.
    pub tags: Vec<String>,
}

/// The ranked stories published for one date.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyEdition {
    /// Publication date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub total_articles: usize,
    pub articles: Vec<RankedArticle>,
}
