//! Error types for configuration loading and validation.
//!
//! The ranking engine itself never fails on article data: missing fields
//! default to empty strings or zero. The only hard failures happen once, at
//! setup, when the configuration is read and checked.

use thiserror::Error;

/// Errors raised while loading or validating an [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`AppConfig`](crate::config::AppConfig).
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Ranking weights do not add up to 1.0.
    #[error("Ranking weights must sum to 1.0 (got {sum})")]
    WeightsDoNotSumToOne {
        /// The actual sum of virality + impact + controversy
        sum: f64,
    },

    /// A single ranking weight is negative or not a finite number.
    #[error("Ranking weight `{name}` must be a finite, non-negative number (got {value})")]
    InvalidWeight {
        /// Which weight is wrong
        name: &'static str,
        /// The configured value
        value: f64,
    },

    /// The near-duplicate threshold lies outside `[0, 1]`.
    #[error("Similarity threshold must lie in [0, 1] (got {0})")]
    InvalidThreshold(f64),

    /// The freshness window is negative or longer than the supported maximum.
    #[error("Time window must lie in [0, {max}] hours (got {hours})")]
    InvalidTimeWindow {
        /// The configured window
        hours: i64,
        /// Largest accepted window
        max: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_error_message() {
        let err = ConfigError::WeightsDoNotSumToOne { sum: 1.2 };
        assert_eq!(err.to_string(), "Ranking weights must sum to 1.0 (got 1.2)");
    }

    #[test]
    fn test_time_window_error_message() {
        let err = ConfigError::InvalidTimeWindow { hours: -1, max: 87_600 };
        assert_eq!(err.to_string(), "Time window must lie in [0, 87600] hours (got -1)");
    }

    #[test]
    fn test_parse_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(err.to_string().starts_with("Failed to parse config"));
    }
}
