//! Observability subsystem.
//!
//! Structured logging only. The watchdog's entire user-visible surface is its
//! log stream, so there is no metrics endpoint and no tracing backend here.

pub mod logging;

pub use logging::{init_logging, LoggingError};
