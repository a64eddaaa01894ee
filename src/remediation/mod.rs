//! Worker restart seam.
//!
//! # Responsibilities
//! - Signal the process supervisor to restart the local worker group
//!
//! # Design Decisions
//! - Fire-and-forget: the loop never waits on or verifies the restart, and
//!   a failure to even spawn the command is logged, not propagated

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::RemediationConfig;

/// Corrective action taken when environment drift is detected.
#[async_trait]
pub trait Remediate: Send + Sync {
    /// Trigger a restart of the local worker processes.
    async fn restart_workers(&self);
}

/// Remediator that restarts a supervisord process group.
pub struct SupervisorRemediator {
    group: String,
}

impl SupervisorRemediator {
    pub fn new(config: &RemediationConfig) -> Self {
        Self {
            group: config.supervisor_group.clone(),
        }
    }
}

#[async_trait]
impl Remediate for SupervisorRemediator {
    async fn restart_workers(&self) {
        let target = format!("{}:*", self.group);

        // The dropped child keeps running; tokio reaps it when it exits.
        match Command::new("supervisorctl")
            .args(["restart", &target])
            .spawn()
        {
            Ok(_child) => {
                tracing::debug!(target = %target, "Restart command issued");
            }
            Err(e) => {
                tracing::error!(target = %target, error = %e, "Failed to spawn supervisorctl");
            }
        }
    }
}
