//! Resolver client seam.
//!
//! The [`DnsClient`] trait is the integration point for everything the scan
//! asks of DNS: per-name resolution, NS lookups for the zone-transfer probe,
//! and the AXFR-style transfer request itself. The production implementation
//! wraps `hickory-resolver` for queries and `hickory-client` for the TCP
//! transfer; tests substitute mocks.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_client::client::{AsyncClient, ClientHandle};
use hickory_client::proto::iocompat::AsyncIoTokioAsStd;
use hickory_client::rr::{DNSClass, Name};
use hickory_client::tcp::TcpClientStream;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use tokio::net::TcpStream as TokioTcpStream;

use crate::error_handling::{LookupError, ScanError};
use crate::models::RecordKind;

/// Capability the scan requires from DNS.
///
/// Implementations must be safe for concurrent use: a single instance is
/// shared across all in-flight lookups through an `Arc`.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Resolves `name` for the given record kind, returning the record
    /// values in answer order.
    async fn resolve(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError>;

    /// Resolves the NS records for `domain`.
    async fn resolve_ns(&self, domain: &str) -> Result<Vec<String>, LookupError>;

    /// Requests an AXFR-style zone transfer for `domain` from `nameserver`.
    ///
    /// Returns the node names exposed by the zone, in zone order, or an error
    /// if the nameserver refuses or the transfer fails.
    async fn attempt_zone_transfer(
        &self,
        nameserver: &str,
        domain: &str,
    ) -> Result<Vec<String>, LookupError>;
}

/// Production [`DnsClient`] backed by `hickory-resolver` and `hickory-client`.
pub struct HickoryClient {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl HickoryClient {
    /// Creates a client with the given per-lookup timeout.
    ///
    /// Uses the default resolver configuration (Google DNS) with a single
    /// retry and `ndots = 0` so candidate names are never expanded through
    /// search domains.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResolverUnavailable`] if the underlying resolver
    /// cannot be constructed. This is the only fatal resolver error; it is
    /// never raised for an individual name.
    pub fn new(timeout: Duration) -> Result<Self, ScanError> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 2; // Reduce retry attempts to fail faster
        opts.ndots = 0;

        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
        Ok(HickoryClient { resolver, timeout })
    }
}

#[async_trait]
impl DnsClient for HickoryClient {
    async fn resolve(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        match self.resolver.lookup(name, record_type_for(kind)).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .filter_map(|rdata| render_rdata(rdata, kind))
                .collect()),
            Err(e) => Err(classify_resolve_error(e)),
        }
    }

    async fn resolve_ns(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        self.resolve(domain, RecordKind::Ns).await
    }

    async fn attempt_zone_transfer(
        &self,
        nameserver: &str,
        domain: &str,
    ) -> Result<Vec<String>, LookupError> {
        // AXFR runs over TCP port 53, so the nameserver hostname has to be
        // resolved to an address first.
        let addresses = self.resolve(nameserver, RecordKind::A).await?;
        let address = addresses
            .first()
            .ok_or_else(|| LookupError::Failed(format!("no address for nameserver {nameserver}")))?;
        let socket_addr: SocketAddr = format!("{address}:53")
            .parse()
            .map_err(|e| LookupError::Failed(format!("bad nameserver address {address}: {e}")))?;

        let zone =
            Name::from_utf8(domain).map_err(|e| LookupError::Failed(format!("bad zone name: {e}")))?;

        match tokio::time::timeout(self.timeout, transfer_zone(socket_addr, zone)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout),
        }
    }
}

/// Performs the actual AXFR request against one nameserver address.
async fn transfer_zone(addr: SocketAddr, zone: Name) -> Result<Vec<String>, LookupError> {
    let (stream, sender) = TcpClientStream::<AsyncIoTokioAsStd<TokioTcpStream>>::new(addr);
    let (mut client, background) = AsyncClient::new(stream, sender, None)
        .await
        .map_err(|e| LookupError::Failed(format!("connection to {addr} failed: {e}")))?;
    // The background task drives the exchange; it ends when the client drops.
    tokio::spawn(background);

    let response = client
        .query(zone, DNSClass::IN, RecordType::AXFR)
        .await
        .map_err(|e| LookupError::Failed(format!("transfer request failed: {e}")))?;

    if response.response_code() != ResponseCode::NoError {
        return Err(LookupError::Failed(format!(
            "transfer refused: {}",
            response.response_code()
        )));
    }

    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for record in response.answers() {
        let name = record.name().to_utf8();
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    if names.is_empty() {
        // Servers that disallow transfers sometimes answer NoError with an
        // empty record set instead of Refused.
        return Err(LookupError::Failed("empty transfer response".to_string()));
    }
    Ok(names)
}

fn record_type_for(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::A => RecordType::A,
        RecordKind::Aaaa => RecordType::AAAA,
        RecordKind::Cname => RecordType::CNAME,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Txt => RecordType::TXT,
        RecordKind::Ns => RecordType::NS,
    }
}

/// Renders one answer record as a value string for the requested kind.
///
/// Answers of other types (e.g. CNAMEs interleaved in an A response) are
/// skipped rather than mis-reported.
fn render_rdata(rdata: &RData, kind: RecordKind) -> Option<String> {
    match (kind, rdata) {
        (RecordKind::A, RData::A(ip)) => Some(ip.to_string()),
        (RecordKind::Aaaa, RData::AAAA(ip)) => Some(ip.to_string()),
        (RecordKind::Cname, RData::CNAME(name)) => Some(name.to_utf8()),
        (RecordKind::Mx, RData::MX(mx)) => {
            Some(format!("{} {}", mx.preference(), mx.exchange().to_utf8()))
        }
        (RecordKind::Txt, RData::TXT(txt)) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        (RecordKind::Ns, RData::NS(ns)) => Some(ns.to_utf8()),
        _ => None,
    }
}

fn classify_resolve_error(e: ResolveError) -> LookupError {
    match e.kind() {
        ResolveErrorKind::Timeout => LookupError::Timeout,
        _ => LookupError::Failed(e.to_string()),
    }
}
