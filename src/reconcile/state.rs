//! Candidate cache entries and scan outcomes.
//!
//! # States
//! - Described: public DNS name fetched, addresses not yet resolved
//! - Resolved: DNS name and address set both cached
//!
//! # State Transitions
//! ```text
//! (absent) → Described: first successful describe of the candidate
//! Described → Resolved: first successful resolution of the cached name
//! ```
//!
//! # Design Decisions
//! - The cache is permanent: a Resolved entry is never refreshed or evicted
//!   for the lifetime of the process. Stale entries are resolved by
//!   restarting the daemon, not by a TTL.
//! - An address set may be empty; that is a cached answer, not a gap

use std::collections::BTreeSet;
use std::net::IpAddr;

/// Cached knowledge about one candidate load balancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateState {
    /// The balancer's public DNS name is known.
    Described { fqdn: String },
    /// The DNS name and its address set are both known.
    Resolved {
        fqdn: String,
        ips: BTreeSet<IpAddr>,
    },
}

impl CandidateState {
    pub fn described(fqdn: String) -> Self {
        Self::Described { fqdn }
    }

    pub fn fqdn(&self) -> &str {
        match self {
            Self::Described { fqdn } | Self::Resolved { fqdn, .. } => fqdn,
        }
    }

    /// Cached address set, if resolution has happened.
    pub fn ips(&self) -> Option<&BTreeSet<IpAddr>> {
        match self {
            Self::Described { .. } => None,
            Self::Resolved { ips, .. } => Some(ips),
        }
    }

    /// Record the resolved address set. Keeps the existing name.
    pub fn resolve(&mut self, ips: BTreeSet<IpAddr>) {
        *self = Self::Resolved {
            fqdn: self.fqdn().to_string(),
            ips,
        };
    }
}

/// Result of one full pass over the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A candidate's address set overlapped the current host's.
    Match {
        index: usize,
        /// Whether the matched balancer's environment differed from the
        /// expected one (and remediation ran).
        drifted: bool,
    },
    /// A candidate matched but its environment tag could not be fetched;
    /// the scan was abandoned and restarts from the first candidate.
    TagLookupFailed { index: usize },
    /// No candidate's address set overlapped the current host's.
    NoMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ips(addrs: &[&str]) -> BTreeSet<IpAddr> {
        addrs.iter().map(|a| a.parse().unwrap()).collect()
    }

    #[test]
    fn test_described_has_no_ips() {
        let state = CandidateState::described("lb.example.com".to_string());
        assert_eq!(state.fqdn(), "lb.example.com");
        assert!(state.ips().is_none());
    }

    #[test]
    fn test_resolve_keeps_fqdn() {
        let mut state = CandidateState::described("lb.example.com".to_string());
        state.resolve(ips(&["10.0.0.5", "10.0.0.6"]));

        assert_eq!(state.fqdn(), "lb.example.com");
        assert_eq!(state.ips().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_resolution_is_a_cached_answer() {
        let mut state = CandidateState::described("lb.example.com".to_string());
        state.resolve(BTreeSet::new());

        assert!(state.ips().is_some());
        assert!(state.ips().unwrap().is_empty());
    }
}
