//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, extraction)
//! - Error categorization into a flat, iterable taxonomy
//! - Processing statistics tracking
//!
//! Per-URL errors fall into two groups:
//! - **Terminal**: invalid input or fetch failure; the result is not `ok`
//! - **Advisory**: a format failed or nothing was found; the result stays `ok`

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{ErrorType, ExtractionError, FetchError, InitializationError};
