//! Per-URL extraction.
//!
//! `extract_one` fetches a page and hands the markup to the result aggregator,
//! which runs the three structured data extractors and summarizes them.

mod aggregate;

use std::sync::Arc;
use std::time::Instant;

use log::{debug, warn};

use crate::fetch::{fetch_with_timeout, PageFetcher};
use crate::models::ExtractionResult;
use crate::utils::duration_to_ms;

pub use aggregate::build_result;

/// Everything `extract_one` needs for a single URL.
#[derive(Clone)]
pub struct ExtractConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Source of page markup
    pub fetcher: Arc<dyn PageFetcher>,
}

impl std::fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Fetches `url` and extracts its structured data.
///
/// Never fails: a fetch failure becomes a result with `ok == false` and a
/// single fetch error, and extractor failures become advisory errors on an
/// `ok` result. `elapsed_ms` covers the whole operation.
pub async fn extract_one(url: &str, config: &ExtractConfig) -> ExtractionResult {
    let start = Instant::now();

    let html = match fetch_with_timeout(config.fetcher.as_ref(), url, config.timeout_ms).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            return ExtractionResult::failed(url, e.into(), duration_to_ms(start.elapsed()));
        }
    };

    let mut result = build_result(url, &html);
    result.elapsed_ms = duration_to_ms(start.elapsed());
    debug!(
        "Extracted {} ({} JSON-LD, {} microdata, {} RDFa) in {} ms",
        url,
        result.nodes.len(),
        result.microdata.len(),
        result.rdfa.len(),
        result.elapsed_ms
    );
    result
}
