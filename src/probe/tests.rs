//! Scheduler tests.
//!
//! All timing-sensitive tests run on tokio's paused clock, so sleeps
//! auto-advance and nothing here waits on real time or real DNS.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::dns::DnsClient;
use crate::error_handling::{FailureKind, LookupError, ProbeStats};
use crate::models::{RecordKind, ResolutionOutcome, ScanTarget};

/// Scripted [`DnsClient`] for scheduler tests.
///
/// Names present in `answers` resolve to the mapped addresses; everything
/// else fails (or returns an empty answer when `empty_answers` is set).
/// Tracks the peak number of lookups in flight for concurrency assertions.
struct MockResolver {
    answers: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    empty_answers: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockResolver {
    fn new() -> Self {
        MockResolver {
            answers: HashMap::new(),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            empty_answers: false,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn answering(names: &[(&str, &str)]) -> Self {
        let mut mock = Self::new();
        for (name, ip) in names {
            mock.answers.insert(name.to_string(), vec![ip.to_string()]);
        }
        mock
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsClient for MockResolver {
    async fn resolve(&self, name: &str, _kind: RecordKind) -> Result<Vec<String>, LookupError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self
            .delays
            .get(name)
            .copied()
            .unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.answers.get(name) {
            Some(ips) => Ok(ips.clone()),
            None if self.empty_answers => Ok(Vec::new()),
            None => Err(LookupError::Failed("NXDOMAIN".to_string())),
        }
    }

    async fn resolve_ns(&self, _domain: &str) -> Result<Vec<String>, LookupError> {
        Ok(Vec::new())
    }

    async fn attempt_zone_transfer(
        &self,
        _nameserver: &str,
        _domain: &str,
    ) -> Result<Vec<String>, LookupError> {
        Err(LookupError::Failed("transfer refused".to_string()))
    }
}

fn target() -> ScanTarget {
    ScanTarget::parse("example.com").unwrap()
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn resolved_names(outcomes: &[ResolutionOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| o.is_resolved())
        .map(|o| o.name().to_string())
        .collect()
}

#[tokio::test]
async fn test_empty_candidate_list_returns_immediately() {
    let client = Arc::new(MockResolver::new());
    let stats = ProbeStats::new();
    let options = ProbeOptions::new(10, Duration::from_secs(2));
    let outcomes = resolve_all(client, &target(), &[], &options, &stats).await;
    assert!(outcomes.is_empty());
    assert_eq!(stats.dispatched(), 0);
}

#[tokio::test]
async fn test_one_outcome_per_candidate_regardless_of_concurrency() {
    let candidates = labels(&["www", "mail", "ftp", "admin", "api", "blog", "shop"]);
    for concurrency in [1, 3, 10, 50] {
        let client = Arc::new(MockResolver::answering(&[
            ("www.example.com", "1.1.1.1"),
            ("api.example.com", "2.2.2.2"),
        ]));
        let stats = ProbeStats::new();
        let options = ProbeOptions::new(concurrency, Duration::from_secs(2));
        let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;

        assert_eq!(outcomes.len(), candidates.len(), "concurrency {concurrency}");
        assert_eq!(stats.resolved() + stats.failed(), candidates.len());
        // One outcome per candidate, in wordlist order
        for (label, outcome) in candidates.iter().zip(&outcomes) {
            assert_eq!(outcome.name(), format!("{label}.example.com"));
        }
    }
}

#[tokio::test]
async fn test_resolved_set_is_independent_of_concurrency() {
    let candidates = labels(&["www", "mail", "ftp", "admin", "api"]);
    let mut sets = Vec::new();
    for concurrency in [1, 2, 8] {
        let client = Arc::new(MockResolver::answering(&[
            ("mail.example.com", "3.3.3.3"),
            ("admin.example.com", "4.4.4.4"),
        ]));
        let stats = ProbeStats::new();
        let options = ProbeOptions::new(concurrency, Duration::from_secs(2));
        let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;
        sets.push(resolved_names(&outcomes));
    }
    assert_eq!(sets[0], vec!["mail.example.com", "admin.example.com"]);
    assert_eq!(sets[0], sets[1]);
    assert_eq!(sets[1], sets[2]);
}

#[tokio::test(start_paused = true)]
async fn test_all_timeouts_still_complete_the_batch() {
    let candidates = labels(&["www", "mail", "ftp", "admin"]);
    let mut mock = MockResolver::new();
    // Every lookup hangs far beyond the per-lookup timeout
    mock.default_delay = Duration::from_secs(3600);
    let client = Arc::new(mock);
    let stats = ProbeStats::new();
    let options = ProbeOptions::new(2, Duration::from_millis(100));
    let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;

    assert_eq!(outcomes.len(), candidates.len());
    assert!(outcomes.iter().all(|o| !o.is_resolved()));
    assert_eq!(stats.failed(), candidates.len());
    assert_eq!(stats.resolved(), 0);
    assert_eq!(
        stats.failure_count(FailureKind::LookupTimeout),
        candidates.len()
    );
}

#[tokio::test]
async fn test_empty_answer_classifies_as_unresolved() {
    let candidates = labels(&["www"]);
    let mut mock = MockResolver::new();
    mock.empty_answers = true;
    let client = Arc::new(mock);
    let stats = ProbeStats::new();
    let options = ProbeOptions::new(4, Duration::from_secs(2));
    let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].is_resolved());
    assert_eq!(stats.failure_count(FailureKind::EmptyAnswer), 1);
}

#[tokio::test(start_paused = true)]
async fn test_outcomes_are_sorted_into_wordlist_order() {
    // The first candidate is the slowest, so completion order is reversed
    let candidates = labels(&["slow", "medium", "fast"]);
    let mut mock = MockResolver::answering(&[
        ("slow.example.com", "1.1.1.1"),
        ("medium.example.com", "2.2.2.2"),
        ("fast.example.com", "3.3.3.3"),
    ]);
    mock.delays
        .insert("slow.example.com".to_string(), Duration::from_secs(30));
    mock.delays
        .insert("medium.example.com".to_string(), Duration::from_secs(10));
    mock.delays
        .insert("fast.example.com".to_string(), Duration::from_secs(1));
    let client = Arc::new(mock);
    let stats = ProbeStats::new();
    let options = ProbeOptions::new(3, Duration::from_secs(60));
    let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;

    let names: Vec<_> = outcomes.iter().map(|o| o.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "slow.example.com",
            "medium.example.com",
            "fast.example.com"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_limit_bounds_lookups_in_flight() {
    let candidates = labels(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    let mut mock = MockResolver::new();
    mock.default_delay = Duration::from_secs(1);
    let client = Arc::new(mock);
    let stats = ProbeStats::new();
    let options = ProbeOptions::new(3, Duration::from_secs(60));
    let outcomes = resolve_all(
        Arc::clone(&client) as Arc<dyn DnsClient>,
        &target(),
        &candidates,
        &options,
        &stats,
    )
    .await;

    assert_eq!(outcomes.len(), candidates.len());
    assert!(
        client.max_in_flight() <= 3,
        "observed {} lookups in flight",
        client.max_in_flight()
    );
}

#[tokio::test]
async fn test_progress_hook_fires_once_per_outcome() {
    let candidates = labels(&["www", "mail", "ftp"]);
    let client = Arc::new(MockResolver::answering(&[("www.example.com", "1.1.1.1")]));
    let stats = ProbeStats::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_hook = Arc::clone(&calls);
    let hook: OutcomeHook = Arc::new(move |_outcome| {
        calls_in_hook.fetch_add(1, Ordering::SeqCst);
    });
    let mut options = ProbeOptions::new(2, Duration::from_secs(2));
    options.on_outcome = Some(hook);

    let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;
    assert_eq!(calls.load(Ordering::SeqCst), outcomes.len());
    assert_eq!(outcomes.len(), candidates.len());
}

#[tokio::test]
async fn test_cancelled_before_start_dispatches_nothing() {
    let candidates = labels(&["www", "mail", "ftp"]);
    let client = Arc::new(MockResolver::new());
    let stats = ProbeStats::new();
    let mut options = ProbeOptions::new(2, Duration::from_secs(2));
    options.cancel = CancellationToken::new();
    options.cancel.cancel();

    let outcomes = resolve_all(client, &target(), &candidates, &options, &stats).await;
    assert!(outcomes.is_empty());
    assert_eq!(stats.dispatched(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_mid_batch_returns_partial_results() {
    let candidates = labels(&[
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
        "s", "t",
    ]);
    let mut mock = MockResolver::new();
    mock.default_delay = Duration::from_secs(100);
    for label in &candidates {
        mock.answers.insert(
            format!("{label}.example.com"),
            vec!["1.2.3.4".to_string()],
        );
    }
    let client = Arc::new(mock);
    let stats = ProbeStats::new();
    let mut options = ProbeOptions::new(2, Duration::from_secs(1000));
    let cancel = CancellationToken::new();
    options.cancel = cancel.clone();

    let tgt = target();
    let (outcomes, ()) = tokio::join!(
        resolve_all(client, &tgt, &candidates, &options, &stats),
        async {
            // Let the first wave complete, then stop the batch mid-flight
            tokio::time::sleep(Duration::from_secs(150)).await;
            cancel.cancel();
        }
    );

    assert!(outcomes.len() < candidates.len());
    assert!(stats.dispatched() < candidates.len());
    assert_eq!(stats.resolved() + stats.failed(), outcomes.len());
    assert!(stats.resolved() + stats.failed() <= stats.dispatched());
}
