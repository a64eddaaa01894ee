//! DNS resolution seam.
//!
//! # Responsibilities
//! - Resolve a hostname to its current set of A/AAAA addresses
//! - Distinguish "no records" (a valid answer) from transport failure
//!
//! # Design Decisions
//! - The reconciler only sees the `Resolve` trait; tests inject scripted
//!   resolvers without touching the network
//! - Addresses are returned as an ordered set so log lines are stable and
//!   intersection is cheap

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

/// Error type for DNS resolution.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("failed to build resolver from system configuration: {0}")]
    SystemConf(String),

    #[error("lookup for {host} failed: {reason}")]
    Lookup { host: String, reason: String },
}

/// Hostname to IP-set resolution.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve `host` to its address set. An empty set means the name exists
    /// but currently has no records; that is not an error.
    async fn resolve(&self, host: &str) -> Result<BTreeSet<IpAddr>, ResolverError>;
}

/// Resolver backed by the host's DNS configuration (/etc/resolv.conf).
pub struct SystemResolver {
    inner: Arc<TokioAsyncResolver>,
}

impl SystemResolver {
    pub fn from_system_conf() -> Result<Self, ResolverError> {
        let inner = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| ResolverError::SystemConf(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}

#[async_trait]
impl Resolve for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<BTreeSet<IpAddr>, ResolverError> {
        match self.inner.lookup_ip(host).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            // An authoritative empty answer is a valid result, not a failure.
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                Ok(BTreeSet::new())
            }
            Err(e) => Err(ResolverError::Lookup {
                host: host.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
