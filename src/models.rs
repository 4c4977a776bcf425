//! Core scan data model.
//!
//! These types are owned by the scan orchestrator and consumed by the report
//! layer. [`ScanResult`] is the JSON output artifact; its field names are
//! stable for downstream tooling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error_handling::ScanError;

/// The root domain a scan runs against.
///
/// Stored normalized: lowercased, with any trailing dot stripped. Immutable
/// for the duration of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget(String);

impl ScanTarget {
    /// Parses and normalizes a domain name.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidTarget`] if the input is empty or contains
    /// an empty label.
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let normalized = input.trim().trim_end_matches('.').to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ScanError::InvalidTarget(
                "domain must not be empty".to_string(),
            ));
        }
        if normalized.split('.').any(|label| label.is_empty()) {
            return Err(ScanError::InvalidTarget(format!(
                "'{input}' contains an empty label"
            )));
        }
        Ok(ScanTarget(normalized))
    }

    /// The normalized domain name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a wordlist label with the target to form a fully-qualified name.
    pub fn qualify(&self, label: &str) -> String {
        format!("{label}.{}", self.0)
    }
}

impl std::fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of record types gathered for the root domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum RecordKind {
    /// IPv4 address records
    A,
    /// IPv6 address records
    Aaaa,
    /// Canonical name records
    Cname,
    /// Mail exchanger records
    Mx,
    /// Text records
    Txt,
    /// Nameserver records
    Ns,
}

impl RecordKind {
    /// The record type tag as it appears in DNS and in the output artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Cname => "CNAME",
            RecordKind::Mx => "MX",
            RecordKind::Txt => "TXT",
            RecordKind::Ns => "NS",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the root domain's standard DNS records.
///
/// All six keys are always present, even when a query failed or returned
/// nothing; a failed query leaves its key mapped to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// A record values
    #[serde(rename = "A", default)]
    pub a: Vec<String>,
    /// AAAA record values
    #[serde(rename = "AAAA", default)]
    pub aaaa: Vec<String>,
    /// CNAME record values
    #[serde(rename = "CNAME", default)]
    pub cname: Vec<String>,
    /// MX record values, formatted as "preference exchange"
    #[serde(rename = "MX", default)]
    pub mx: Vec<String>,
    /// TXT record values
    #[serde(rename = "TXT", default)]
    pub txt: Vec<String>,
    /// NS record values
    #[serde(rename = "NS", default)]
    pub ns: Vec<String>,
}

impl RecordSnapshot {
    /// The values recorded for one record kind.
    pub fn records(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::A => &self.a,
            RecordKind::Aaaa => &self.aaaa,
            RecordKind::Cname => &self.cname,
            RecordKind::Mx => &self.mx,
            RecordKind::Txt => &self.txt,
            RecordKind::Ns => &self.ns,
        }
    }

    /// Mutable access to the values for one record kind.
    pub fn records_mut(&mut self, kind: RecordKind) -> &mut Vec<String> {
        match kind {
            RecordKind::A => &mut self.a,
            RecordKind::Aaaa => &mut self.aaaa,
            RecordKind::Cname => &mut self.cname,
            RecordKind::Mx => &mut self.mx,
            RecordKind::Txt => &mut self.txt,
            RecordKind::Ns => &mut self.ns,
        }
    }

    /// Iterates over all six record kinds and their values, in tag order.
    pub fn entries(&self) -> impl Iterator<Item = (RecordKind, &[String])> + '_ {
        RecordKind::iter().map(move |kind| (kind, self.records(kind)))
    }
}

/// A subdomain discovered by the brute-force probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    /// Fully-qualified name, e.g. `www.example.com`
    pub subdomain: String,
    /// Addresses the name resolved to, in answer order
    pub ips: Vec<String>,
    /// Record type the probe queried (currently always "A")
    #[serde(rename = "type")]
    pub record_type: String,
}

/// Outcome of one candidate's resolution attempt.
///
/// Produced exactly once per candidate per scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The candidate resolved to at least one address.
    Resolved(Subdomain),
    /// The candidate did not resolve (failure, timeout, or empty answer).
    Unresolved {
        /// The fully-qualified name that was probed
        name: String,
    },
}

impl ResolutionOutcome {
    /// The fully-qualified name this outcome belongs to.
    pub fn name(&self) -> &str {
        match self {
            ResolutionOutcome::Resolved(sub) => &sub.subdomain,
            ResolutionOutcome::Unresolved { name } => name,
        }
    }

    /// Whether the candidate resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    /// Consumes the outcome, returning the subdomain if it resolved.
    pub fn into_resolved(self) -> Option<Subdomain> {
        match self {
            ResolutionOutcome::Resolved(sub) => Some(sub),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }
}

/// Counts and wall-clock span of a completed scan.
///
/// Derived entirely from the scheduler's outcomes; for a scan that ran to
/// completion `successful + failed == total_queries`, after cancellation
/// `successful + failed <= total_queries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Number of candidate labels issued to the scheduler
    pub total_queries: usize,
    /// Candidates that resolved
    pub successful: usize,
    /// Candidates that completed without resolving
    pub failed: usize,
    /// Wall-clock scan start
    pub started_at: DateTime<Utc>,
    /// Wall-clock scan end
    pub finished_at: DateTime<Utc>,
}

impl ScanStatistics {
    /// Scan duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for ScanStatistics {
    fn default() -> Self {
        ScanStatistics {
            total_queries: 0,
            successful: 0,
            failed: 0,
            started_at: DateTime::UNIX_EPOCH,
            finished_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// Aggregate result of one scan invocation.
///
/// Immutable once the scan completes. Serializes to the JSON output artifact;
/// field names and nesting are stable for downstream tooling. Statistics are
/// runtime-only and not part of the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The scanned domain, normalized
    pub domain: String,
    /// Standard records gathered for the root domain
    pub dns_records: RecordSnapshot,
    /// Subdomains discovered by the brute-force probe, in wordlist order
    pub subdomains: Vec<Subdomain>,
    /// Node names exposed by a successful zone transfer, or empty
    pub zone_transfer: Vec<String>,
    /// Scan completion time (ISO-8601 in the artifact)
    pub timestamp: DateTime<Utc>,
    /// Scan statistics (not serialized)
    #[serde(skip)]
    pub statistics: ScanStatistics,
}
