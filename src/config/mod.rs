//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WatchdogConfig (validated, immutable)
//!     → handed by value to the selected subcommand
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload path (the daemon is
//!   restarted externally when its arguments change)
//! - All fields have defaults so the binary runs with no config file at all
//! - The pause durations default to the values the watchdog has always used;
//!   they are rate limits against the cloud API, not tuning knobs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{AwsConfig, RemediationConfig, TimingConfig, WatchdogConfig};
