//! Standard record aggregation for the root domain.

use log::debug;

use crate::dns::DnsClient;
use crate::models::{RecordKind, RecordSnapshot, ScanTarget};
use strum::IntoEnumIterator;

/// Gathers the six standard record types for the target domain.
///
/// Issues one query per record kind. A failure for any single kind leaves
/// that kind empty and does not prevent attempts for the remaining kinds;
/// the returned snapshot always has all six keys present.
pub async fn fetch_records(client: &dyn DnsClient, target: &ScanTarget) -> RecordSnapshot {
    let mut snapshot = RecordSnapshot::default();
    for kind in RecordKind::iter() {
        match client.resolve(target.as_str(), kind).await {
            Ok(values) => *snapshot.records_mut(kind) = values,
            Err(e) => {
                // Missing records are routine for most domains
                debug!("{kind} record lookup failed for {target}: {e}");
            }
        }
    }
    snapshot
}
