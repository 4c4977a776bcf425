//! Zone-transfer misconfiguration probing.

use log::{debug, info, warn};

use crate::dns::DnsClient;
use crate::models::ScanTarget;

/// Probes every authoritative nameserver of the target for an open zone
/// transfer, stopping at the first one that accepts.
///
/// Nameservers are tried strictly in the order the NS lookup returned them;
/// once one accepts, the remaining nameservers are not contacted. A failed
/// NS lookup or a refusal from every nameserver yields an empty result, not
/// an error.
pub async fn probe_zone_transfer(client: &dyn DnsClient, target: &ScanTarget) -> Vec<String> {
    let nameservers = match client.resolve_ns(target.as_str()).await {
        Ok(nameservers) => nameservers,
        Err(e) => {
            warn!("NS lookup failed for {target}: {e}");
            return Vec::new();
        }
    };

    for nameserver in &nameservers {
        let nameserver = nameserver.trim_end_matches('.');
        match client.attempt_zone_transfer(nameserver, target.as_str()).await {
            Ok(names) => {
                info!(
                    "Zone transfer accepted by {nameserver} ({} names exposed)",
                    names.len()
                );
                return names;
            }
            Err(e) => {
                debug!("Zone transfer refused by {nameserver}: {e}");
            }
        }
    }

    Vec::new()
}
