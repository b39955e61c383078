//! Progress logging utilities.

use log::info;
use std::time::Instant;

/// Logs how far a batch has got.
///
/// # Arguments
///
/// * `start_time` - When the batch started
/// * `completed` - URLs finished so far (any outcome)
/// * `total` - URLs in the batch
pub fn log_progress(start_time: Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} URLs in {:.2} seconds (~{:.2} URLs/sec)",
        completed, total, elapsed_secs, rate
    );
}
