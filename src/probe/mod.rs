//! Liveness probe subsystem.
//!
//! # Data Flow
//! ```text
//! Listening → accept → per-connection task
//!     read … read → EOF/error → connection closed → task ends
//! Listening keeps accepting while connections drain
//! ```
//!
//! # Design Decisions
//! - The probe shares nothing with the reconciliation loop; its only job is
//!   to prove the process holds an open listening socket
//! - Payload is read and discarded, never inspected
//! - One task per connection, so a slow peer cannot block new accepts

pub mod server;

pub use server::{ProbeError, ProbeServer};
