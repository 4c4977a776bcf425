//! Progress logging utilities.

use log::info;

use crate::error_handling::ProbeStats;

/// Logs progress information about the brute-force batch.
///
/// # Arguments
///
/// * `start_time` - When the batch started
/// * `stats` - Live probe counters
/// * `total` - Number of candidate labels in the batch
pub fn log_progress(start_time: std::time::Instant, stats: &ProbeStats, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = stats.completed();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {completed} of {total} candidates in {elapsed_secs:.2} seconds (~{rate:.2} lookups/sec, {} found)",
        stats.resolved()
    );
}
