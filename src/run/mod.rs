//! Batch processing.
//!
//! `orchestrate` runs one extraction per prepared entry on a bounded worker
//! pool and returns results in input order. `run_report` is the batch entry
//! point: prepare, orchestrate, tally, and wrap the results in a `Report`.

mod pool;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Result};
use chrono::{SecondsFormat, Utc};
use log::info;

use crate::app::{log_progress, prepare_urls, print_error_statistics};
use crate::config::{Config, MSG_NO_URLS, PROGRESS_LOG_INTERVAL};
use crate::error_handling::{ExtractionError, ProcessingStats};
use crate::extract::{extract_one, ExtractConfig};
use crate::fetch::PageFetcher;
use crate::models::{Entry, ExtractionResult, Report};

use pool::map_with_concurrency;

/// Extracts every entry with at most `concurrency` extractions in flight.
///
/// The output has one result per entry, in the same order. Entries without a
/// valid URL get an `InvalidUrl` result and `extract_fn` is never called for
/// them. If the work for an entry panics, that entry gets a `WorkerPanicked`
/// result and the rest of the batch is unaffected.
///
/// A `concurrency` of 0 is treated as 1.
pub async fn orchestrate<F, Fut>(
    entries: Vec<Entry>,
    concurrency: usize,
    extract_fn: F,
) -> Vec<ExtractionResult>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ExtractionResult> + Send + 'static,
{
    let total = entries.len();
    let start = Instant::now();
    let completed = Arc::new(AtomicUsize::new(0));
    let inputs: Vec<String> = entries.iter().map(|e| e.input.clone()).collect();

    let completed_for_workers = Arc::clone(&completed);
    let extract_fn = Arc::new(extract_fn);
    let slots = map_with_concurrency(entries, concurrency, move |_, entry: &Entry| {
        let completed = Arc::clone(&completed_for_workers);
        let extract_fn = Arc::clone(&extract_fn);
        let input = entry.input.clone();
        let url = entry.url.clone();
        async move {
            let result = match url {
                Some(url) => (*extract_fn)(url).await,
                None => ExtractionResult::failed(input, ExtractionError::InvalidUrl, 0),
            };
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if done % PROGRESS_LOG_INTERVAL == 0 && done < total {
                log_progress(start, done, total);
            }
            result
        }
    })
    .await;

    log_progress(start, completed.load(Ordering::SeqCst), total);

    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, input)| {
            slot.unwrap_or_else(|| {
                ExtractionResult::failed(input, ExtractionError::WorkerPanicked, 0)
            })
        })
        .collect()
}

/// Runs a whole batch and returns the report envelope.
///
/// Raw inputs are prepared with `config.limits` (blank lines dropped, list
/// capped, URLs validated), then every entry is extracted through `fetcher`.
///
/// # Errors
///
/// Fails only when no entry survives preparation. Individual URL failures are
/// recorded in their results and never fail the batch.
pub async fn run_report<I, S>(
    raw_urls: I,
    config: &Config,
    fetcher: Arc<dyn PageFetcher>,
) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries = prepare_urls(raw_urls, config.limits.max_urls);
    if entries.is_empty() {
        bail!(MSG_NO_URLS);
    }

    let limits = config.limits;
    info!(
        "Extracting {} URL{} (concurrency {}, timeout {} ms)",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" },
        limits.concurrency.max(1),
        limits.timeout_ms
    );

    let start = Instant::now();
    let extract_config = Arc::new(ExtractConfig {
        timeout_ms: limits.timeout_ms,
        fetcher,
    });
    let results = orchestrate(entries, limits.concurrency, move |url| {
        let extract_config = Arc::clone(&extract_config);
        async move { extract_one(&url, &extract_config).await }
    })
    .await;

    let stats = ProcessingStats::new();
    for result in &results {
        stats.record_url(result.ok, &result.errors);
    }
    print_error_statistics(&stats, start.elapsed().as_secs_f64());

    Ok(Report {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        count: results.len(),
        results,
    })
}
