//! Runtime configuration for the ranking engine, ingest and edition output.
//!
//! Configuration is read from an optional YAML file. Every section and field
//! carries `#[serde(default)]`, so a file only needs to name what it
//! overrides:
//!
//! ```yaml
//! engine:
//!   weights:
//!     virality: 0.4
//!     impact: 0.4
//!     controversy: 0.2
//!   similarity_threshold: 0.85
//! edition:
//!   max_stories: 30
//! ```
//!
//! Keyword lists (impact taxonomy, controversy indicators, tag rules and
//! summary rules) are ordered; order decides tag order and summary
//! precedence.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

/// Allowed drift of the ranking weight sum away from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Longest accepted freshness window: ten years.
pub const MAX_TIME_WINDOW_HOURS: i64 = 24 * 365 * 10;

fn words(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub ingest: IngestConfig,
    pub edition: EditionConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or fall back to the built-in defaults.
    ///
    /// The result is validated before it is returned, so a bad weight table
    /// fails here, once, rather than per article.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse,
    /// or fails [`AppConfig::validate`].
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Read {
                        path: path.to_string(),
                        source,
                    })?;
                let config = Self::from_yaml(&raw)?;
                info!(path, "Loaded configuration file");
                config
            }
            None => {
                info!("No config file given; using built-in defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section that has hard preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.ingest.validate()
    }

    /// Parse a YAML document without validating it.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Everything the deduplication and ranking engine needs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: RankingWeights,
    /// Title similarity above which two reports are the same story.
    pub similarity_threshold: f64,
    pub impact_taxonomy: Vec<ImpactCategory>,
    pub virality: ViralityConfig,
    pub controversy: ControversyConfig,
    pub tag_rules: Vec<TagRule>,
    pub summary: SummaryConfig,
}

impl EngineConfig {
    /// Check the hard preconditions of the engine.
    ///
    /// Each weight must be finite and non-negative and the three must sum to
    /// 1.0 within [`WEIGHT_TOLERANCE`]. Weights are never silently
    /// renormalized. The similarity threshold must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("virality", w.virality),
            ("impact", w.impact),
            ("controversy", w.controversy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let sum = w.virality + w.impact + w.controversy;
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne { sum });
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold(self.similarity_threshold));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            similarity_threshold: 0.8,
            impact_taxonomy: default_impact_taxonomy(),
            virality: ViralityConfig::default(),
            controversy: ControversyConfig::default(),
            tag_rules: default_tag_rules(),
            summary: SummaryConfig::default(),
        }
    }
}

/// Relative weight of each score in the final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RankingWeights {
    pub virality: f64,
    pub impact: f64,
    pub controversy: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            virality: 0.5,
            impact: 0.35,
            controversy: 0.15,
        }
    }
}

/// One entry of the impact taxonomy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImpactCategory {
    pub name: String,
    pub keywords: Vec<String>,
    /// Points added once when any keyword matches.
    pub score: f64,
}

impl ImpactCategory {
    pub fn new(name: &str, keywords: &[&str], score: f64) -> Self {
        Self {
            name: name.to_string(),
            keywords: words(keywords),
            score,
        }
    }
}

fn default_impact_taxonomy() -> Vec<ImpactCategory> {
    vec![
        ImpactCategory::new(
            "funding_round",
            &["funding", "raise", "investment", "series", "venture", "capital", "round"],
            20.0,
        ),
        ImpactCategory::new(
            "acquisition",
            &["acquire", "acquisition", "merger", "buyout", "takeover", "purchase"],
            25.0,
        ),
        ImpactCategory::new(
            "layoffs",
            &["layoff", "firing", "job cuts", "restructuring", "downsizing", "redundancy"],
            15.0,
        ),
        ImpactCategory::new(
            "policy",
            &["regulation", "policy", "government", "legal", "law", "compliance"],
            20.0,
        ),
        ImpactCategory::new(
            "product_launch",
            &["launch", "release", "announce", "new product", "beta", "preview"],
            10.0,
        ),
        ImpactCategory::new(
            "security",
            &["hack", "breach", "security", "cyber", "vulnerability", "attack"],
            15.0,
        ),
        ImpactCategory::new(
            "india_macro",
            &["india", "indian", "delhi", "mumbai", "bangalore", "hyderabad", "chennai"],
            10.0,
        ),
        ImpactCategory::new(
            "ai_ml",
            &["ai", "artificial intelligence", "machine learning", "ml", "neural", "gpt"],
            15.0,
        ),
        ImpactCategory::new(
            "crypto",
            &["crypto", "bitcoin", "blockchain", "nft", "defi", "ethereum"],
            12.0,
        ),
        ImpactCategory::new(
            "ipo",
            &["ipo", "initial public offering", "public listing", "stock market"],
            18.0,
        ),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViralityConfig {
    /// Multiplier applied to the secondary metric (comments) before it is
    /// added to the primary one.
    pub secondary_weight: f64,
}

impl Default for ViralityConfig {
    fn default() -> Self {
        Self {
            secondary_weight: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControversyConfig {
    pub keywords: Vec<String>,
    /// Points per distinct keyword present.
    pub per_hit: f64,
    pub cap: f64,
}

impl Default for ControversyConfig {
    fn default() -> Self {
        Self {
            keywords: words(&[
                "controversy",
                "debate",
                "dispute",
                "conflict",
                "criticism",
                "backlash",
                "outrage",
                "protest",
                "boycott",
                "lawsuit",
            ]),
            per_hit: 20.0,
            cap: 100.0,
        }
    }
}

/// A content tag attached when any keyword hits the title or body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagRule {
    pub tag: String,
    pub keywords: Vec<String>,
}

impl TagRule {
    pub fn new(tag: &str, keywords: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            keywords: words(keywords),
        }
    }
}

fn default_tag_rules() -> Vec<TagRule> {
    vec![
        TagRule::new("funding", &["funding", "raise", "investment"]),
        TagRule::new("m&a", &["acquire", "acquisition", "merger"]),
        TagRule::new("layoffs", &["layoff", "firing", "job cuts"]),
        TagRule::new("policy", &["regulation", "policy", "government"]),
        TagRule::new("product", &["launch", "release", "announce"]),
        TagRule::new("security", &["hack", "breach", "security"]),
    ]
}

/// A "what happened" sentence selected when any keyword hits the title.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryRule {
    pub keywords: Vec<String>,
    pub sentence: String,
}

impl SummaryRule {
    pub fn new(keywords: &[&str], sentence: &str) -> Self {
        Self {
            keywords: words(keywords),
            sentence: sentence.to_string(),
        }
    }
}

/// Canned sentences for the templated summary.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Tested in order; the first hit wins.
    pub rules: Vec<SummaryRule>,
    pub fallback: String,
    pub india_context: String,
    pub global_context: String,
    pub filler: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                SummaryRule::new(
                    &["funding", "raise", "investment"],
                    "A funding round was announced.",
                ),
                SummaryRule::new(
                    &["acquire", "acquisition", "merger"],
                    "An acquisition or merger was announced.",
                ),
                SummaryRule::new(
                    &["layoff", "firing", "job cuts"],
                    "Layoffs or job cuts were announced.",
                ),
                SummaryRule::new(
                    &["launch", "release", "announce"],
                    "A new product or service was launched.",
                ),
            ],
            fallback: "A significant development was reported.".to_string(),
            india_context: "This development has implications for the Indian startup ecosystem."
                .to_string(),
            global_context: "This development has global implications for the tech industry."
                .to_string(),
            filler: "The story has attracted significant attention from the tech community."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Drop records published this many hours before the reference instant.
    /// `None` keeps everything.
    pub time_window_hours: Option<i64>,
}

impl IngestConfig {
    /// The window must lie in `[0, MAX_TIME_WINDOW_HOURS]` when set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.time_window_hours {
            Some(hours) if !(0..=MAX_TIME_WINDOW_HOURS).contains(&hours) => {
                Err(ConfigError::InvalidTimeWindow {
                    hours,
                    max: MAX_TIME_WINDOW_HOURS,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            time_window_hours: Some(48),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EditionConfig {
    pub max_stories: usize,
    /// Editions smaller than this are still written, with a warning.
    pub min_stories: usize,
}

impl Default for EditionConfig {
    fn default() -> Self {
        Self {
            max_stories: 50,
            min_stories: 10,
        }
    }
}
