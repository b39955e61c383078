//! Run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Prints a one-line summary followed by per-category error counts.
///
/// Terminal failures and advisory errors are listed separately so a reader can
/// tell unreachable pages from pages that merely lacked structured data.
pub fn print_error_statistics(stats: &ProcessingStats, elapsed_seconds: f64) {
    let total_urls = stats.total_urls();
    info!(
        "Processed {} URL{} ({} ok, {} failed) in {:.1}s",
        total_urls,
        if total_urls == 1 { "" } else { "s" },
        stats.successful_urls(),
        stats.failed_urls(),
        elapsed_seconds
    );

    if stats.total_errors() == 0 {
        return;
    }

    for (heading, terminal) in [("Failures", true), ("Advisories", false)] {
        let counts: Vec<(ErrorType, usize)> = ErrorType::iter()
            .filter(|t| t.is_terminal() == terminal)
            .map(|t| (t, stats.get_error_count(t)))
            .filter(|(_, count)| *count > 0)
            .collect();
        if counts.is_empty() {
            continue;
        }
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        info!("{} ({} total):", heading, total);
        for (error_type, count) in counts {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}
