//! Bounded-fanout subdomain resolution.
//!
//! One A-record lookup task per candidate label, admission-gated by a
//! semaphore so at most `concurrency` lookups are in flight; as soon as one
//! completes, the next queued candidate is admitted. Outcomes are collected
//! by the single join loop, so the result list and per-outcome hook never see
//! concurrent writes. A failed or timed-out lookup yields an unresolved
//! outcome for that candidate only; it never aborts sibling lookups or the
//! batch.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::dns::DnsClient;
use crate::error_handling::{FailureKind, LookupError, ProbeStats};
use crate::models::{RecordKind, ResolutionOutcome, ScanTarget, Subdomain};

/// Observer invoked once per completed candidate, from the collection loop.
///
/// Used for live status lines; the scan result itself is assembled from the
/// returned outcome list.
pub type OutcomeHook = Arc<dyn Fn(&ResolutionOutcome) + Send + Sync>;

/// Tuning and control for one [`resolve_all`] batch.
pub struct ProbeOptions {
    /// Maximum number of lookups in flight concurrently (at least 1)
    pub concurrency: usize,
    /// Timeout applied to each individual lookup, not the batch as a whole
    pub per_lookup_timeout: Duration,
    /// Cancels the batch: pending candidates are not launched and in-flight
    /// lookups abort promptly
    pub cancel: CancellationToken,
    /// Optional per-outcome observer
    pub on_outcome: Option<OutcomeHook>,
}

impl ProbeOptions {
    /// Creates options with no cancellation wired up and no observer.
    pub fn new(concurrency: usize, per_lookup_timeout: Duration) -> Self {
        ProbeOptions {
            concurrency,
            per_lookup_timeout,
            cancel: CancellationToken::new(),
            on_outcome: None,
        }
    }
}

/// Resolves every candidate label against the target, bounded by the
/// concurrency limit.
///
/// Every candidate is attempted exactly once and produces exactly one
/// outcome; the call returns only after all of them have completed (or the
/// batch is cancelled). The returned list is sorted back into wordlist
/// order, since completion order depends on lookup latency.
///
/// A successful resolution with a non-empty address list yields
/// [`ResolutionOutcome::Resolved`]; any failure, timeout, or empty answer
/// yields [`ResolutionOutcome::Unresolved`] for that candidate alone.
///
/// On cancellation the already-completed outcomes are returned and `stats`
/// reflects only completed attempts.
pub async fn resolve_all(
    client: Arc<dyn DnsClient>,
    target: &ScanTarget,
    candidates: &[String],
    options: &ProbeOptions,
    stats: &ProbeStats,
) -> Vec<ResolutionOutcome> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let concurrency = options.concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = FuturesUnordered::new();

    for (index, label) in candidates.iter().enumerate() {
        // Admission gate: wait for a free slot, unless the batch is being
        // torn down, in which case pending candidates are never launched.
        let permit = tokio::select! {
            biased;
            _ = options.cancel.cancelled() => {
                debug!(
                    "Cancelled with {} of {} candidates not dispatched",
                    candidates.len() - index,
                    candidates.len()
                );
                break;
            }
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        stats.record_dispatched();
        let name = target.qualify(label);
        let client = Arc::clone(&client);
        let cancel = options.cancel.clone();
        let timeout = options.per_lookup_timeout;

        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = tokio::time::timeout(timeout, client.resolve(&name, RecordKind::A)) => {
                    Some((index, classify(name, result)))
                }
            }
        }));
    }

    let mut outcomes: Vec<(usize, ResolutionOutcome)> = Vec::with_capacity(candidates.len());
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(Some((index, (outcome, failure)))) => {
                match failure {
                    None => stats.record_resolved(),
                    Some(kind) => stats.record_failure(kind),
                }
                if let Some(hook) = &options.on_outcome {
                    hook(&outcome);
                }
                outcomes.push((index, outcome));
            }
            Ok(None) => {} // lookup aborted by cancellation
            Err(join_error) => {
                warn!("Resolution task panicked: {join_error:?}");
                stats.record_failure(FailureKind::LookupFailed);
            }
        }
    }

    // Completion order is nondeterministic; report in wordlist order.
    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Classifies one lookup result into an outcome plus its failure category.
fn classify(
    name: String,
    result: Result<Result<Vec<String>, LookupError>, tokio::time::error::Elapsed>,
) -> (ResolutionOutcome, Option<FailureKind>) {
    match result {
        Ok(Ok(ips)) if !ips.is_empty() => (
            ResolutionOutcome::Resolved(Subdomain {
                subdomain: name,
                ips,
                record_type: RecordKind::A.as_str().to_string(),
            }),
            None,
        ),
        // An empty answer counts as a miss, the same as NXDOMAIN
        Ok(Ok(_)) => (
            ResolutionOutcome::Unresolved { name },
            Some(FailureKind::EmptyAnswer),
        ),
        Ok(Err(LookupError::Timeout)) => (
            ResolutionOutcome::Unresolved { name },
            Some(FailureKind::LookupTimeout),
        ),
        Ok(Err(LookupError::Failed(_))) => (
            ResolutionOutcome::Unresolved { name },
            Some(FailureKind::LookupFailed),
        ),
        Err(_) => (
            ResolutionOutcome::Unresolved { name },
            Some(FailureKind::LookupTimeout),
        ),
    }
}
