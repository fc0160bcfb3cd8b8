//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the news ranker.
///
/// # Examples
///
/// ```sh
/// # Rank two scraper dumps into ./editions using the built-in defaults
/// awful_news_ranker -i india.json -i global.json -o ./editions
///
/// # Rebuild a past edition with custom weights
/// awful_news_ranker -i 2025-05-06.json -o ./editions -c ranker.yaml -d 2025-05-06
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON file of raw articles produced by a scraper (repeatable; order is arrival order)
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output directory for the daily edition JSON
    #[arg(short, long)]
    pub output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Edition date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "awful_news_ranker",
            "--input",
            "india.json",
            "--input",
            "global.json",
            "--output-dir",
            "./editions",
        ]);

        assert_eq!(cli.inputs, vec!["india.json", "global.json"]);
        assert_eq!(cli.output_dir, "./editions");
        assert!(cli.config.is_none());
        assert!(cli.date.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "awful_news_ranker",
            "-i",
            "a.json",
            "b.json",
            "-o",
            "/tmp/editions",
            "-c",
            "ranker.yaml",
            "-d",
            "2025-05-06",
        ]);

        assert_eq!(cli.inputs, vec!["a.json", "b.json"]);
        assert_eq!(cli.config.as_deref(), Some("ranker.yaml"));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 5, 6));
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["awful_news_ranker", "-o", "./editions"]).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(
            Cli::try_parse_from(["awful_news_ranker", "-i", "a.json", "-o", "x", "-d", "06/05/2025"])
                .is_err()
        );
    }
}
