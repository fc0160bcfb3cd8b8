//! # Awful News Ranker
//!
//! Turns a day's worth of scraped startup and tech news from many outlets
//! into a single deduplicated, ranked and annotated daily edition.
//!
//! ## Usage
//!
//! ```sh
//! awful_news_ranker -i india.json -i global.json -o ./editions
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Ingest**: Read scraper output, clean links, drop stale records
//! 2. **Deduplicate**: Merge reports of the same story into one canonical article
//! 3. **Score**: Virality (batch-relative), impact and controversy, each in `[0, 100]`
//! 4. **Rank**: Weighted final score with a stable sort, then tags and summaries
//! 5. **Output**: Write the capped daily edition as JSON
//!
//! Steps 2–4 live in [`engine`] and perform no I/O.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod engine;
mod error;
mod ingest;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use config::AppConfig;
use engine::Engine;
use outputs::{edition, json};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news ranker starting up");

    let args = Cli::parse();
    debug!(?args.inputs, ?args.output_dir, ?args.config, ?args.date, "Parsed CLI arguments");

    // ---- Config & engine (the only hard failure point) ----
    let config = match AppConfig::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    let engine = Engine::new(config.engine.clone())?;

    // Fail before doing any work if the edition cannot be written
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Ingest ----
    let (edition_date, reference) = ingest::edition_clock(args.date, Local::now());

    let raw = ingest::load_articles(&args.inputs).await;
    let raw = ingest::prepare(raw, config.ingest.time_window_hours, reference);
    info!(count = raw.len(), %edition_date, "Articles ready for ranking");

    // ---- Rank ----
    let ranked = engine.process(&raw);

    // ---- Output ----
    let daily = edition::build_edition(edition_date, ranked, &config.edition);
    edition::log_top_stories(&daily);

    if let Err(e) = json::write_edition(&daily, &args.output_dir).await {
        error!(error = %e, "Failed to write daily edition");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        stories = daily.total_articles,
        "Execution complete"
    );

    Ok(())
}
