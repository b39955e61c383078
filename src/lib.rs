//! structured_data_report library: batch extraction of structured data from web pages
//!
//! This library fetches a list of URLs concurrently and extracts the
//! structured data embedded in each page (JSON-LD script blocks, Microdata
//! items and RDFa attributes) into normalized, serializable records.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use structured_data_report::initialization::init_client;
//! use structured_data_report::{run_report, Config, HttpFetcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let fetcher = Arc::new(HttpFetcher::new(client, config.limits.timeout_ms));
//!
//! let report = run_report(["https://example.com/"], &config, fetcher).await?;
//! for result in &report.results {
//!     println!("{}: {} JSON-LD nodes", result.url, result.nodes.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
mod extract;
mod fetch;
pub mod initialization;
pub mod models;
mod parse;
mod run;
mod utils;

// Re-export public API
pub use app::{normalize_url, prepare_urls, read_url_lines};
pub use config::{Config, Limits, LogFormat, LogLevel, Opt};
pub use error_handling::{
    ErrorType, ExtractionError, FetchError, InitializationError, ProcessingStats,
};
pub use extract::{build_result, extract_one, ExtractConfig};
pub use fetch::{fetch_with_timeout, HttpFetcher, PageFetcher};
pub use models::{Entry, ExtractionResult, Report};
pub use parse::{
    extract_json_ld, extract_microdata, extract_rdfa, extract_title, node_types, JsonLdExtraction,
};
pub use run::{orchestrate, run_report};
