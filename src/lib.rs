//! AWS ELB WatchDog Library

pub mod config;
pub mod inspector;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod reconcile;
pub mod remediation;
pub mod resolver;

pub use config::WatchdogConfig;
pub use lifecycle::Shutdown;
pub use probe::ProbeServer;
pub use reconcile::Reconciler;
