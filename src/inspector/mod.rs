//! Load-balancer inspection seam.
//!
//! # Responsibilities
//! - Fetch a balancer's public DNS name by its identifier
//! - Fetch a balancer's deployment-environment tag by its identifier
//!
//! # Design Decisions
//! - The reconciler only sees the `Inspect` trait; every failure mode is an
//!   `InspectorError` the loop logs and retries later, never a panic
//! - The production adapter lives in `aws.rs`; tests use scripted mocks

pub mod aws;

use async_trait::async_trait;
use thiserror::Error;

pub use aws::AwsCliInspector;

/// Error type for inspector queries. All variants are transient from the
/// caller's point of view: log, skip, retry on a later scan.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("failed to invoke cloud CLI: {0}")]
    Invoke(#[from] std::io::Error),

    #[error("cloud CLI exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("failed to parse cloud API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("load balancer {name} not found")]
    NotFound { name: String },

    #[error("load balancer {name} has no environment tag")]
    MissingTag { name: String },
}

/// Queries against the infrastructure provider for one load balancer.
#[async_trait]
pub trait Inspect: Send + Sync {
    /// Public DNS name of the balancer identified by `name`.
    async fn describe(&self, name: &str) -> Result<String, InspectorError>;

    /// Deployment-environment token the balancer is tagged with.
    async fn environment_tag(&self, name: &str) -> Result<String, InspectorError>;
}
