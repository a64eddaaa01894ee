//! Reconciliation loop: match the current host against candidate load
//! balancers and restart workers on environment drift.
//!
//! # Data Flow
//! ```text
//! scan (one pass, candidates in input order):
//!     describe candidate → cache fqdn        (inspector, once per candidate)
//!     resolve fqdn → cache address set       (resolver, once per candidate)
//!     intersect with current host addresses
//!     on match → fetch environment tag
//!         tag differs → pause, restart workers, pause, re-resolve host
//!     → ScanOutcome
//!
//! run (forever):
//!     scan → pause per outcome → scan → ...
//! ```
//!
//! # Design Decisions
//! - Candidate order is priority order: the first match ends the scan, and
//!   every scan restarts from the first candidate
//! - The candidate cache is permanent (see state.rs); only the current
//!   host's addresses are ever re-resolved, and only after remediation
//! - Inspector and resolver calls are bounded by a timeout so a stalled
//!   cloud call cannot wedge the loop
//! - Every failure is log-and-continue; nothing here is fatal

pub mod state;

use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};

use crate::config::TimingConfig;
use crate::inspector::Inspect;
use crate::remediation::Remediate;
use crate::resolver::Resolve;

pub use state::{CandidateState, ScanOutcome};

/// The reconciliation loop and its state.
pub struct Reconciler {
    /// Candidate balancer names, in priority order.
    candidates: Vec<String>,
    /// Environment token this host is supposed to be served under.
    expected_env: String,
    /// Public endpoint of this deployment slot.
    current_fqdn: String,
    /// Addresses the endpoint currently resolves to.
    current_ips: BTreeSet<IpAddr>,
    /// Permanent per-candidate cache, keyed by list index.
    cache: HashMap<usize, CandidateState>,
    timing: TimingConfig,
    inspector: Arc<dyn Inspect>,
    resolver: Arc<dyn Resolve>,
    remediator: Arc<dyn Remediate>,
}

impl Reconciler {
    pub fn new(
        candidates: Vec<String>,
        expected_env: String,
        current_fqdn: String,
        timing: TimingConfig,
        inspector: Arc<dyn Inspect>,
        resolver: Arc<dyn Resolve>,
        remediator: Arc<dyn Remediate>,
    ) -> Self {
        Self {
            candidates,
            expected_env,
            current_fqdn,
            current_ips: BTreeSet::new(),
            cache: HashMap::new(),
            timing,
            inspector,
            resolver,
            remediator,
        }
    }

    /// Run until the shutdown signal fires. Never returns otherwise.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::debug!(
            expected = %self.expected_env,
            candidates = self.candidates.len(),
            "Initializing load balancer watch"
        );

        // The loop is useless without the host's own addresses; keep trying
        // until the first resolution succeeds.
        loop {
            match timeout(
                self.timing.call_timeout(),
                self.resolver.resolve(&self.current_fqdn),
            )
            .await
            {
                Ok(Ok(ips)) => {
                    tracing::info!(fqdn = %self.current_fqdn, ipaddr = ?ips, "Connected host");
                    self.current_ips = ips;
                    break;
                }
                Ok(Err(e)) => {
                    tracing::error!(fqdn = %self.current_fqdn, error = %e, "Failed to resolve current host");
                }
                Err(_) => {
                    tracing::error!(fqdn = %self.current_fqdn, "Timed out resolving current host");
                }
            }

            if !pause_or_shutdown(self.timing.no_match_pause(), &mut shutdown).await {
                tracing::info!("Reconciliation loop stopped");
                return;
            }
        }

        loop {
            tracing::debug!("Starting check loop");

            let outcome = self.scan().await;
            let pause = match outcome {
                ScanOutcome::TagLookupFailed { .. } => self.timing.tag_retry_pause(),
                ScanOutcome::Match { .. } => self.timing.post_match_pause(),
                ScanOutcome::NoMatch => {
                    tracing::error!("Could not match any load balancer to the current host");
                    self.timing.no_match_pause()
                }
            };

            if !pause_or_shutdown(pause, &mut shutdown).await {
                break;
            }
        }

        tracing::info!("Reconciliation loop stopped");
    }

    /// One full pass over the candidate list.
    ///
    /// Ends at the first candidate whose cached address set overlaps the
    /// current host's; candidates after it are not evaluated this pass.
    async fn scan(&mut self) -> ScanOutcome {
        for index in 0..self.candidates.len() {
            let name = self.candidates[index].clone();
            tracing::debug!(index, candidate = %name, "Checking candidate");

            let fqdn = match self.cache.get(&index).map(|s| s.fqdn().to_string()) {
                Some(fqdn) => fqdn,
                None => {
                    tracing::debug!(index, candidate = %name, "Retrieving balancer details");
                    match timeout(self.timing.call_timeout(), self.inspector.describe(&name))
                        .await
                    {
                        Ok(Ok(fqdn)) => {
                            self.cache
                                .insert(index, CandidateState::described(fqdn.clone()));
                            fqdn
                        }
                        Ok(Err(e)) => {
                            tracing::error!(index, candidate = %name, error = %e, "Failed to retrieve balancer details");
                            continue;
                        }
                        Err(_) => {
                            tracing::error!(index, candidate = %name, "Timed out retrieving balancer details");
                            continue;
                        }
                    }
                }
            };

            let ips = match self.cache.get(&index).and_then(|s| s.ips()).cloned() {
                Some(ips) => ips,
                None => {
                    tracing::debug!(index, candidate = %name, fqdn = %fqdn, "Resolving balancer address");
                    match timeout(self.timing.call_timeout(), self.resolver.resolve(&fqdn)).await
                    {
                        Ok(Ok(ips)) => {
                            // An empty answer is cached too; only transport
                            // failures leave the entry unresolved for retry.
                            if let Some(state) = self.cache.get_mut(&index) {
                                state.resolve(ips.clone());
                            }
                            ips
                        }
                        Ok(Err(e)) => {
                            tracing::error!(index, candidate = %name, fqdn = %fqdn, error = %e, "Failed to resolve balancer address");
                            continue;
                        }
                        Err(_) => {
                            tracing::error!(index, candidate = %name, fqdn = %fqdn, "Timed out resolving balancer address");
                            continue;
                        }
                    }
                }
            };

            tracing::info!(index, candidate = %name, fqdn = %fqdn, ipaddr = ?ips, "Candidate");

            if self.current_ips.is_disjoint(&ips) {
                continue;
            }

            tracing::info!(index, candidate = %name, "Balancer match");

            let tag = match timeout(
                self.timing.call_timeout(),
                self.inspector.environment_tag(&name),
            )
            .await
            {
                Ok(Ok(tag)) => tag,
                Ok(Err(e)) => {
                    tracing::error!(index, candidate = %name, error = %e, "Could not retrieve balancer environment");
                    return ScanOutcome::TagLookupFailed { index };
                }
                Err(_) => {
                    tracing::error!(index, candidate = %name, "Timed out retrieving balancer environment");
                    return ScanOutcome::TagLookupFailed { index };
                }
            };

            if tag != self.expected_env {
                tracing::warn!(
                    index,
                    candidate = %name,
                    expected = %self.expected_env,
                    actual = %tag,
                    "Environments do not match"
                );
                sleep(self.timing.pre_restart_pause()).await;
                tracing::info!("Restarting workers");
                self.remediator.restart_workers().await;
                sleep(self.timing.post_restart_pause()).await;
                self.refresh_current_ips().await;
                return ScanOutcome::Match {
                    index,
                    drifted: true,
                };
            }

            tracing::debug!(index, candidate = %name, environment = %tag, "Environment matches");
            return ScanOutcome::Match {
                index,
                drifted: false,
            };
        }

        ScanOutcome::NoMatch
    }

    /// Re-resolve the current host after remediation; a restart may change
    /// which endpoint answers. Keeps the previous set on failure.
    async fn refresh_current_ips(&mut self) {
        match timeout(
            self.timing.call_timeout(),
            self.resolver.resolve(&self.current_fqdn),
        )
        .await
        {
            Ok(Ok(ips)) => {
                tracing::info!(fqdn = %self.current_fqdn, ipaddr = ?ips, "Updated host");
                self.current_ips = ips;
            }
            Ok(Err(e)) => {
                tracing::error!(fqdn = %self.current_fqdn, error = %e, "Failed to refresh host address, keeping previous set");
            }
            Err(_) => {
                tracing::error!(fqdn = %self.current_fqdn, "Timed out refreshing host address, keeping previous set");
            }
        }
    }
}

async fn pause_or_shutdown(duration: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
    tokio::select! {
        _ = sleep(duration) => true,
        _ = shutdown.recv() => false,
    }
}
