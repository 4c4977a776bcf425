//! Error taxonomy and per-scan failure counters.
//!
//! Per-candidate and per-record-type failures never propagate past the
//! component that produced them; they are downgraded to empty or unresolved
//! outcomes and tracked in [`ProbeStats`]. Only the fatal error kinds in
//! [`ScanError`] abort a scan.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Fatal errors that abort a scan.
///
/// Everything else (individual lookup timeouts, NXDOMAIN, SERVFAIL, a
/// nameserver refusing a zone transfer) is handled at the component boundary
/// and never reaches the caller as an error.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The DNS resolver client could not be constructed.
    ///
    /// Raised only at construction time, never for an individual name.
    #[error("DNS resolver unavailable: {0}")]
    ResolverUnavailable(String),

    /// The target domain is empty or not a valid label sequence.
    #[error("invalid target domain: {0}")]
    InvalidTarget(String),

    /// The JSON output artifact could not be written.
    ///
    /// Surfaced to the caller after the scan completes; the computed results
    /// are still available.
    #[error("failed to write output file: {0}")]
    OutputWriteFailed(#[from] std::io::Error),
}

/// Per-lookup failures.
///
/// All variants are non-fatal: the scheduler converts them to an unresolved
/// outcome for the affected candidate and the record aggregator converts them
/// to an empty value list for the affected record type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The lookup did not complete within its timeout window.
    #[error("lookup timed out")]
    Timeout,

    /// The lookup completed but failed (NXDOMAIN, SERVFAIL, malformed
    /// response, connection failure).
    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Failure categories tracked while probing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// A lookup hit its per-lookup timeout.
    LookupTimeout,
    /// A lookup failed outright (NXDOMAIN, SERVFAIL, malformed response).
    LookupFailed,
    /// A lookup succeeded but returned no addresses.
    ///
    /// Classified as a miss, same as a failed lookup. A name that resolves to
    /// zero A records (e.g. AAAA-only) is indistinguishable from one that
    /// does not exist.
    EmptyAnswer,
}

impl FailureKind {
    /// Human-readable label used in the end-of-run statistics block.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::LookupTimeout => "Lookup timeout",
            FailureKind::LookupFailed => "Lookup failed",
            FailureKind::EmptyAnswer => "Empty answer",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe probe statistics tracker.
///
/// Tracks dispatched/resolved counts and failure categories using atomic
/// counters, allowing concurrent reads from the progress logging task while
/// the scheduler updates them. All failure kinds are initialized to zero on
/// creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using
/// `Arc`.
pub struct ProbeStats {
    dispatched: AtomicUsize,
    resolved: AtomicUsize,
    failed: AtomicUsize,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl ProbeStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }
        ProbeStats {
            dispatched: AtomicUsize::new(0),
            resolved: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            failures,
        }
    }

    /// Records that a candidate has been admitted and its lookup launched.
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a candidate that resolved to at least one address.
    pub fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a candidate that produced no addresses, with the reason.
    pub fn record_failure(&self, kind: FailureKind) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        // All FailureKind variants are initialized in new(), so unwrap() is safe
        self.failures
            .get(&kind)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Number of candidates whose lookup has been launched.
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Number of candidates that resolved.
    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }

    /// Number of candidates that completed without resolving.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Number of candidates that have produced an outcome so far.
    pub fn completed(&self) -> usize {
        self.resolved() + self.failed()
    }

    /// Count for a single failure category.
    pub fn failure_count(&self, kind: FailureKind) -> usize {
        // All FailureKind variants are initialized in new(), so unwrap() is safe
        self.failures.get(&kind).unwrap().load(Ordering::SeqCst)
    }

    /// Logs the non-zero failure categories.
    pub fn log_summary(&self) {
        let failed = self.failed();
        if failed == 0 {
            return;
        }
        info!("Failure counts ({} total):", failed);
        for kind in FailureKind::iter() {
            let count = self.failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}
