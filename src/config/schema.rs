//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section and field carries a default, so a missing or partial file
//! still yields a runnable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the watchdog.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Pause durations and call timeouts for the reconciliation loop.
    pub timing: TimingConfig,

    /// Cloud API settings for the load-balancer inspector.
    pub aws: AwsConfig,

    /// Remediation (worker restart) settings.
    pub remediation: RemediationConfig,
}

/// Pause and timeout settings, all in whole seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause after a failed environment-tag lookup, before the scan restarts.
    pub tag_retry_pause_secs: u64,

    /// Pause between drift detection and the restart command.
    pub pre_restart_pause_secs: u64,

    /// Pause after the restart command, before the host IPs are re-resolved.
    pub post_restart_pause_secs: u64,

    /// Pause after any match, before the next scan starts.
    pub post_match_pause_secs: u64,

    /// Pause after a scan in which no candidate matched.
    pub no_match_pause_secs: u64,

    /// Upper bound on any single inspector or resolver call.
    pub call_timeout_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tag_retry_pause_secs: 10,
            pre_restart_pause_secs: 30,
            post_restart_pause_secs: 30,
            post_match_pause_secs: 30,
            no_match_pause_secs: 30,
            call_timeout_secs: 15,
        }
    }
}

impl TimingConfig {
    pub fn tag_retry_pause(&self) -> Duration {
        Duration::from_secs(self.tag_retry_pause_secs)
    }

    pub fn pre_restart_pause(&self) -> Duration {
        Duration::from_secs(self.pre_restart_pause_secs)
    }

    pub fn post_restart_pause(&self) -> Duration {
        Duration::from_secs(self.post_restart_pause_secs)
    }

    pub fn post_match_pause(&self) -> Duration {
        Duration::from_secs(self.post_match_pause_secs)
    }

    pub fn no_match_pause(&self) -> Duration {
        Duration::from_secs(self.no_match_pause_secs)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// Cloud API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Region the load balancers live in.
    pub region: String,

    /// Name of the AWS CLI binary to invoke.
    pub cli_bin: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            cli_bin: "aws".to_string(),
        }
    }
}

/// Remediation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemediationConfig {
    /// Supervisor process group whose members are restarted on drift.
    /// The restart targets `<group>:*`.
    pub supervisor_group: String,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            supervisor_group: "daemon".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_historical_pauses() {
        let timing = TimingConfig::default();
        assert_eq!(timing.tag_retry_pause(), Duration::from_secs(10));
        assert_eq!(timing.pre_restart_pause(), Duration::from_secs(30));
        assert_eq!(timing.post_restart_pause(), Duration::from_secs(30));
        assert_eq!(timing.post_match_pause(), Duration::from_secs(30));
        assert_eq!(timing.no_match_pause(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: WatchdogConfig = toml::from_str(
            r#"
            [timing]
            no_match_pause_secs = 5

            [aws]
            region = "eu-west-1"
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.no_match_pause_secs, 5);
        assert_eq!(config.timing.post_match_pause_secs, 30);
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.aws.cli_bin, "aws");
        assert_eq!(config.remediation.supervisor_group, "daemon");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: WatchdogConfig = toml::from_str("").unwrap();
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.timing.call_timeout_secs, 15);
    }
}
