//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → lifecycle::Shutdown broadcast
//!
//! Shutdown (shutdown.rs):
//!     broadcast observed → loops exit at their next pause point → process exits
//! ```
//!
//! # Design Decisions
//! - The watchdog never exits on its own; only a signal ends it
//! - The between-scan pauses are select!-ed against the shutdown channel so
//!   a kill does not wait out a 30-second sleep; an in-flight remediation
//!   sequence still runs to completion first

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_termination;
