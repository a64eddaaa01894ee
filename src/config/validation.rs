//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, non-empty identifiers)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: WatchdogConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::WatchdogConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timing.call_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "timing.call_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.aws.region.trim().is_empty() {
        errors.push(ValidationError {
            field: "aws.region",
            message: "must not be empty".to_string(),
        });
    }

    if config.aws.cli_bin.trim().is_empty() {
        errors.push(ValidationError {
            field: "aws.cli_bin",
            message: "must not be empty".to_string(),
        });
    }

    if config.remediation.supervisor_group.trim().is_empty() {
        errors.push(ValidationError {
            field: "remediation.supervisor_group",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WatchdogConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WatchdogConfig::default();
        config.timing.call_timeout_secs = 0;
        config.aws.region = String::new();
        config.remediation.supervisor_group = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "timing.call_timeout_secs"));
        assert!(errors.iter().any(|e| e.field == "aws.region"));
        assert!(errors
            .iter()
            .any(|e| e.field == "remediation.supervisor_group"));
    }
}
