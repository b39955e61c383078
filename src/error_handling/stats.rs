//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for the errors recorded in
//! per-URL results during a batch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, ExtractionError};

/// Thread-safe processing statistics tracker.
///
/// Tracks one atomic counter per `ErrorType`, allowing concurrent access from
/// multiple workers. All types are initialized to zero on creation. The
/// counters are observational only and never influence a result.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    urls: AtomicUsize,
    successful: AtomicUsize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            urls: AtomicUsize::new(0),
            successful: AtomicUsize::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Records one finished URL and every error it carries.
    pub fn record_url(&self, ok: bool, errors: &[ExtractionError]) {
        self.urls.fetch_add(1, Ordering::Relaxed);
        if ok {
            self.successful.fetch_add(1, Ordering::Relaxed);
        }
        for error in errors {
            self.increment_error(error.error_type());
        }
    }

    /// Current count for one error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Number of URLs recorded so far.
    pub fn total_urls(&self) -> usize {
        self.urls.load(Ordering::Relaxed)
    }

    /// Number of recorded URLs whose result was `ok`.
    pub fn successful_urls(&self) -> usize {
        self.successful.load(Ordering::Relaxed)
    }

    /// Number of recorded URLs whose result was not `ok`.
    pub fn failed_urls(&self) -> usize {
        self.total_urls().saturating_sub(self.successful_urls())
    }
}
