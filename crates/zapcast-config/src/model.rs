// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Zapcast console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Zapcast configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZapcastConfig {
    /// Console identity and logging settings.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Remote campaign gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Device pairing settings.
    #[serde(default)]
    pub pairing: PairingConfig,
}

/// Console identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Display name of the console instance.
    #[serde(default = "default_console_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: default_console_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_console_name() -> String {
    "zapcast".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote campaign gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the campaign gateway.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token sent as the `x-api-token` header. `None` sends no token.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8350".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Device pairing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PairingConfig {
    /// Identifier of the account's messaging-device connection.
    #[serde(default = "default_connection_id")]
    pub connection_id: String,

    /// Seconds between gateway polls while waiting for the device to link.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds before an unanswered pairing attempt is abandoned.
    #[serde(default = "default_link_timeout_secs")]
    pub link_timeout_secs: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            connection_id: default_connection_id(),
            poll_interval_secs: default_poll_interval_secs(),
            link_timeout_secs: default_link_timeout_secs(),
        }
    }
}

fn default_connection_id() -> String {
    "primary".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_link_timeout_secs() -> u64 {
    120
}
