//! DNS module tests.
//!
//! These run against a scripted mock client so no network is involved.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::error_handling::LookupError;
use crate::models::{RecordKind, ScanTarget};

/// Scripted [`DnsClient`]: answers come from fixed tables, and every
/// zone-transfer attempt is recorded for call-count assertions.
struct MockClient {
    records: HashMap<RecordKind, Vec<String>>,
    ns: Result<Vec<String>, LookupError>,
    transfers: HashMap<String, Result<Vec<String>, LookupError>>,
    transfer_calls: Mutex<Vec<String>>,
}

impl MockClient {
    fn new() -> Self {
        MockClient {
            records: HashMap::new(),
            ns: Ok(Vec::new()),
            transfers: HashMap::new(),
            transfer_calls: Mutex::new(Vec::new()),
        }
    }

    fn transfer_calls(&self) -> Vec<String> {
        self.transfer_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsClient for MockClient {
    async fn resolve(&self, _name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        match self.records.get(&kind) {
            Some(values) => Ok(values.clone()),
            None => Err(LookupError::Failed("no records found".to_string())),
        }
    }

    async fn resolve_ns(&self, _domain: &str) -> Result<Vec<String>, LookupError> {
        self.ns.clone()
    }

    async fn attempt_zone_transfer(
        &self,
        nameserver: &str,
        _domain: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.transfer_calls
            .lock()
            .unwrap()
            .push(nameserver.to_string());
        self.transfers
            .get(nameserver)
            .cloned()
            .unwrap_or_else(|| Err(LookupError::Failed("transfer refused".to_string())))
    }
}

fn target() -> ScanTarget {
    ScanTarget::parse("example.com").unwrap()
}

#[tokio::test]
async fn test_fetch_records_all_failures_keeps_all_six_keys() {
    let client = MockClient::new();
    let snapshot = fetch_records(&client, &target()).await;
    let entries: Vec<_> = snapshot.entries().collect();
    assert_eq!(entries.len(), 6);
    for (kind, values) in entries {
        assert!(values.is_empty(), "{kind} should be empty");
    }
}

#[tokio::test]
async fn test_fetch_records_partial_failure_does_not_block_other_kinds() {
    let mut client = MockClient::new();
    client
        .records
        .insert(RecordKind::A, vec!["93.184.216.34".to_string()]);
    client
        .records
        .insert(RecordKind::Ns, vec!["ns1.example.com.".to_string()]);

    let snapshot = fetch_records(&client, &target()).await;
    assert_eq!(snapshot.a, vec!["93.184.216.34"]);
    assert_eq!(snapshot.ns, vec!["ns1.example.com."]);
    assert!(snapshot.mx.is_empty());
    assert!(snapshot.txt.is_empty());
}

#[tokio::test]
async fn test_zone_transfer_first_success_wins() {
    let mut client = MockClient::new();
    client.ns = Ok(vec![
        "ns1.example.com.".to_string(),
        "ns2.example.com.".to_string(),
        "ns3.example.com.".to_string(),
    ]);
    client.transfers.insert(
        "ns1.example.com".to_string(),
        Err(LookupError::Failed("refused".to_string())),
    );
    client.transfers.insert(
        "ns2.example.com".to_string(),
        Ok(vec!["a".to_string(), "b".to_string()]),
    );
    client
        .transfers
        .insert("ns3.example.com".to_string(), Ok(vec!["c".to_string()]));

    let result = probe_zone_transfer(&client, &target()).await;
    assert_eq!(result, vec!["a", "b"]);
    // ns3 must not be contacted once ns2 accepted
    assert_eq!(
        client.transfer_calls(),
        vec!["ns1.example.com", "ns2.example.com"]
    );
}

#[tokio::test]
async fn test_zone_transfer_ns_lookup_failure_yields_empty() {
    let mut client = MockClient::new();
    client.ns = Err(LookupError::Timeout);
    let result = probe_zone_transfer(&client, &target()).await;
    assert!(result.is_empty());
    assert!(client.transfer_calls().is_empty());
}

#[tokio::test]
async fn test_zone_transfer_all_refusals_yield_empty() {
    let mut client = MockClient::new();
    client.ns = Ok(vec![
        "ns1.example.com.".to_string(),
        "ns2.example.com.".to_string(),
    ]);
    let result = probe_zone_transfer(&client, &target()).await;
    assert!(result.is_empty());
    // Every nameserver was tried before giving up
    assert_eq!(
        client.transfer_calls(),
        vec!["ns1.example.com", "ns2.example.com"]
    );
}

#[tokio::test]
async fn test_zone_transfer_strips_trailing_dot_from_nameserver() {
    let mut client = MockClient::new();
    client.ns = Ok(vec!["ns1.example.com.".to_string()]);
    let _ = probe_zone_transfer(&client, &target()).await;
    assert_eq!(client.transfer_calls(), vec!["ns1.example.com"]);
}
