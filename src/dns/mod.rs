//! DNS operations.
//!
//! This module provides the resolver client seam and the two root-domain
//! probes built on it:
//! - [`DnsClient`] / [`HickoryClient`]: per-name resolution, NS lookups, and
//!   AXFR transfer requests
//! - [`fetch_records`]: the six standard record types for the root domain
//! - [`probe_zone_transfer`]: sequential first-success-wins transfer probing

mod client;
mod records;
mod zone_transfer;

// Re-export public API
pub use client::{DnsClient, HickoryClient};
pub use records::fetch_records;
pub use zone_transfer::probe_zone_transfer;

#[cfg(test)]
mod tests;
