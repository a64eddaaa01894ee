//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, at process start
//! - Route output to stdout or to the file given on the command line
//!
//! # Design Decisions
//! - Uses the tracing crate for structured key-value logging
//! - Log level configurable via RUST_LOG, defaults to debug for this crate
//! - Log file is opened in append mode so an external rotate-and-restart
//!   scheme does not lose lines

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    OpenLogFile(#[from] std::io::Error),
}

/// Initialize the global tracing subscriber.
///
/// When `log_file` is `None`, events go to stdout (the behavior health-check
/// wrappers and supervisors expect from this daemon).
pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "driftwatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(())
}
