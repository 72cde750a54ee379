// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shape and the poll-interval/deadline relation.

use crate::diagnostic::ConfigError;
use crate::model::ZapcastConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &ZapcastConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.console.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.console.log_level
            ),
        });
    }

    let base_url = config.gateway.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("gateway.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.gateway.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.pairing.connection_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "pairing.connection_id must not be empty".to_string(),
        });
    }

    if config.pairing.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "pairing.poll_interval_secs must be at least 1".to_string(),
        });
    }

    // The deadline must outlast at least one poll tick.
    if config.pairing.link_timeout_secs <= config.pairing.poll_interval_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "pairing.link_timeout_secs ({}) must be greater than pairing.poll_interval_secs ({})",
                config.pairing.link_timeout_secs, config.pairing.poll_interval_secs
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
