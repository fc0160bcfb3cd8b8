//! JSON output of the daily edition.
//!
//! One file per date, `{output_dir}/edition_{YYYY-MM-DD}.json`. Rerunning
//! for the same date replaces the file.

use crate::models::DailyEdition;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path the edition for `edition.date` is written to.
pub fn edition_path(edition: &DailyEdition, output_dir: &str) -> PathBuf {
    PathBuf::from(output_dir).join(format!("edition_{}.json", edition.date))
}

/// Serialize `edition` as pretty JSON under `output_dir`.
///
/// # Returns
///
/// The path written, or an error if directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, date = %edition.date))]
pub async fn write_edition(
    edition: &DailyEdition,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(edition)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = edition_path(edition, output_dir);
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = edition.total_articles, "Wrote daily edition");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn edition() -> DailyEdition {
        DailyEdition {
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            generated_at: Utc::now(),
            total_articles: 0,
            articles: vec![],
        }
    }

    #[test]
    fn test_edition_path() {
        assert_eq!(
            edition_path(&edition(), "/tmp/out"),
            PathBuf::from("/tmp/out/edition_2025-05-06.json")
        );
    }

    #[tokio::test]
    async fn test_write_edition_round_trips() {
        let dir = std::env::temp_dir().join(format!("ranker-json-{}", std::process::id()));
        let dir_str = dir.to_string_lossy().into_owned();

        let path = write_edition(&edition(), &dir_str).await.unwrap();
        let written = fs::read_to_string(&path).await.unwrap();
        let parsed: DailyEdition = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.date, edition().date);
        assert_eq!(parsed.total_articles, 0);
        assert!(written.contains("\"date\": \"2025-05-06\""));

        let _ = fs::remove_dir_all(&dir).await;
    }
}
