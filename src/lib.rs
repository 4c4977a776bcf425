//! domain_recon library: DNS reconnaissance core
//!
//! This library enumerates a target domain's standard DNS records, probes
//! its nameservers for an open zone transfer, and brute-forces candidate
//! subdomains from a wordlist under a bounded concurrency cap.
//!
//! # Example
//!
//! ```no_run
//! use domain_recon::{run_scan, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     concurrency: 20,
//!     ..Default::default()
//! };
//!
//! let result = run_scan(config, CancellationToken::new()).await?;
//! println!(
//!     "Found {} subdomains out of {} candidates",
//!     result.subdomains.len(),
//!     result.statistics.total_queries
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod probe;
pub mod report;
pub mod wordlist;

// Re-export public API
pub use config::{Config, LogLevel};
pub use error_handling::{LookupError, ScanError};
pub use models::{
    RecordKind, RecordSnapshot, ResolutionOutcome, ScanResult, ScanStatistics, ScanTarget,
    Subdomain,
};
pub use run::run_scan;

// Internal run module (contains the scan orchestration logic)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, shutdown_gracefully};
    use crate::config::{Config, LOGGING_INTERVAL_SECS};
    use crate::dns::{self, DnsClient, HickoryClient};
    use crate::error_handling::{ProbeStats, ScanError};
    use crate::models::{ResolutionOutcome, ScanResult, ScanStatistics, ScanTarget, Subdomain};
    use crate::probe::{self, OutcomeHook, ProbeOptions};
    use crate::wordlist;

    /// Runs a full reconnaissance scan with the provided configuration.
    ///
    /// This is the main entry point for the library. It gathers the target's
    /// standard DNS records, probes its nameservers for an open zone
    /// transfer, then brute-forces the wordlist concurrently, and assembles
    /// everything into a single [`ScanResult`].
    ///
    /// The three phases are logically independent; the record and
    /// zone-transfer phases run before the brute force so their log output
    /// stays readable, matching the report's section order.
    ///
    /// # Arguments
    ///
    /// * `config` - Scan configuration (target, wordlist, concurrency, ...)
    /// * `cancel` - Cancels the scan; already-collected results are still
    ///   returned and the statistics cover only completed attempts
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The target domain is empty or malformed
    /// - The DNS resolver client cannot be constructed
    ///
    /// Individual lookup failures never abort the scan; they surface as
    /// empty record lists or unresolved candidates.
    pub async fn run_scan(
        config: Config,
        cancel: CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let target = ScanTarget::parse(&config.domain)?;
        let per_lookup_timeout = Duration::from_secs(config.timeout_seconds);
        let client: Arc<dyn DnsClient> = Arc::new(HickoryClient::new(per_lookup_timeout)?);

        let candidates = wordlist::load_wordlist(config.wordlist.as_deref()).await;
        info!(
            "Starting scan of {target} ({} candidate labels, concurrency {})",
            candidates.len(),
            config.concurrency
        );

        let started_at = Utc::now();
        let start_time = std::time::Instant::now();

        info!("Gathering DNS records...");
        let dns_records = dns::fetch_records(client.as_ref(), &target).await;

        info!("Checking for zone transfer...");
        let zone_transfer = if cancel.is_cancelled() {
            Vec::new()
        } else {
            dns::probe_zone_transfer(client.as_ref(), &target).await
        };

        info!(
            "Starting subdomain brute force with {} entries",
            candidates.len()
        );
        let stats = Arc::new(ProbeStats::new());

        let logging_cancel = CancellationToken::new();
        let logging_task = {
            let stats = Arc::clone(&stats);
            let cancel = logging_cancel.child_token();
            let total = candidates.len();
            tokio::spawn(async move {
                let mut interval =
                    tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL_SECS));
                // The first tick fires immediately; skip it
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            log_progress(start_time, &stats, total);
                        }
                        _ = cancel.cancelled() => {
                            break;
                        }
                    }
                }
            })
        };

        let on_outcome: OutcomeHook = Arc::new(|outcome| {
            if let ResolutionOutcome::Resolved(sub) = outcome {
                info!("Found: {} -> {}", sub.subdomain, sub.ips.join(", "));
            }
        });
        let options = ProbeOptions {
            concurrency: config.concurrency,
            per_lookup_timeout,
            cancel: cancel.clone(),
            on_outcome: Some(on_outcome),
        };

        let outcomes =
            probe::resolve_all(Arc::clone(&client), &target, &candidates, &options, &stats).await;

        shutdown_gracefully(logging_cancel, Some(logging_task)).await;

        let finished_at = Utc::now();
        let subdomains: Vec<Subdomain> = outcomes
            .into_iter()
            .filter_map(ResolutionOutcome::into_resolved)
            .collect();

        let statistics = ScanStatistics {
            total_queries: candidates.len(),
            successful: stats.resolved(),
            failed: stats.failed(),
            started_at,
            finished_at,
        };
        log_progress(start_time, &stats, candidates.len());
        stats.log_summary();

        Ok(ScanResult {
            domain: target.to_string(),
            dns_records,
            subdomains,
            zone_transfer,
            timestamp: finished_at,
            statistics,
        })
    }
}
