//! Loading scraper output into the engine.
//!
//! Scrapers drop their results as JSON arrays of [`RawArticle`], one file per
//! run or per source. This module reads those files, cleans the links and
//! applies the freshness window before the batch reaches the engine.
//!
//! Files are read concurrently but collected in the order they were given,
//! so arrival order (the dedup tie-breaker) is the command-line order.
//! Records are decoded one by one: a malformed record is logged and
//! skipped, the rest of its file still loads.

use crate::engine::normalize::clean_url;
use crate::models::RawArticle;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::error::Error;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

const PARALLEL_READS: usize = 8;

/// Read every input file and concatenate the records in file order.
///
/// A file that cannot be read or parsed is logged and skipped without
/// failing the batch.
#[instrument(level = "info", skip_all, fields(files = paths.len()))]
pub async fn load_articles(paths: &[String]) -> Vec<RawArticle> {
    let batches: Vec<Vec<RawArticle>> = stream::iter(paths.iter())
        .map(|path| async move {
            match read_batch(path).await {
                Ok(batch) => {
                    debug!(%path, count = batch.len(), "Read input file");
                    batch
                }
                Err(e) => {
                    error!(%path, error = %e, "Failed to read input file; skipping");
                    Vec::new()
                }
            }
        })
        .buffered(PARALLEL_READS)
        .collect()
        .await;

    let articles: Vec<RawArticle> = batches.into_iter().flatten().collect();
    info!(count = articles.len(), "Loaded raw articles");
    articles
}

async fn read_batch(path: &str) -> Result<Vec<RawArticle>, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let records: Vec<Value> = serde_json::from_str(&raw)?;
    Ok(decode_records(path, records))
}

fn decode_records(path: &str, records: Vec<Value>) -> Vec<RawArticle> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<RawArticle>(record) {
            Ok(article) => Some(article),
            Err(e) => {
                warn!(%path, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// Resolve the edition date and the freshness reference from one clock.
///
/// Without an explicit date the edition is today's local date and the
/// reference is `now`. With a date the reference is the last second of
/// that local day.
pub fn edition_clock(
    date: Option<NaiveDate>,
    now: DateTime<Local>,
) -> (NaiveDate, DateTime<Utc>) {
    match date {
        None => (now.date_naive(), now.with_timezone(&Utc)),
        Some(date) => {
            let reference = date
                .and_hms_opt(23, 59, 59)
                .and_then(|end| Local.from_local_datetime(&end).latest())
                .map(|end| end.with_timezone(&Utc))
                .unwrap_or_else(|| now.with_timezone(&Utc));
            (date, reference)
        }
    }
}

/// Clean links and drop records older than the freshness window.
///
/// Records without a publication time are kept. `window_hours = None`
/// disables the filter.
#[instrument(level = "info", skip_all, fields(input = articles.len(), ?window_hours, %reference))]
pub fn prepare(
    articles: Vec<RawArticle>,
    window_hours: Option<i64>,
    reference: DateTime<Utc>,
) -> Vec<RawArticle> {
    let cutoff = window_hours
        .and_then(TimeDelta::try_hours)
        .and_then(|window| reference.checked_sub_signed(window));
    if window_hours.is_some() && cutoff.is_none() {
        warn!(?window_hours, "Freshness window out of range; keeping every record");
    }
    let before = articles.len();

    let prepared: Vec<RawArticle> = articles
        .into_iter()
        .filter(|a| match (cutoff, a.published_at) {
            (Some(cutoff), Some(published)) => published >= cutoff,
            _ => true,
        })
        .map(|mut a| {
            a.url = clean_url(&a.url);
            a
        })
        .collect();

    let dropped = before - prepared.len();
    if dropped > 0 {
        warn!(dropped, "Dropped articles outside the freshness window");
    }
    prepared
}
