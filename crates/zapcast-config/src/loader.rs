// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zapcast.toml` > `~/.config/zapcast/zapcast.toml` > `/etc/zapcast/zapcast.toml`
//! with environment variable overrides via `ZAPCAST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ZapcastConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zapcast/zapcast.toml` (system-wide)
/// 3. `~/.config/zapcast/zapcast.toml` (user XDG config)
/// 4. `./zapcast.toml` (local directory)
/// 5. `ZAPCAST_*` environment variables
pub fn load_config() -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::file("/etc/zapcast/zapcast.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zapcast/zapcast.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zapcast.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `ZAPCAST_GATEWAY_BASE_URL`
/// must map to `gateway.base_url`, not `gateway.base.url`.
fn env_provider() -> Env {
    Env::prefixed("ZAPCAST_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ZAPCAST_GATEWAY_BASE_URL -> "gateway_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("console_", "console.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("pairing_", "pairing.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_str_applies_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:8350");
        assert_eq!(config.pairing.poll_interval_secs, 5);
    }

    #[test]
    fn load_from_str_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[gateway]
base_url = "https://gateway.example.com"
api_token = "secret"
"#,
        )
        .unwrap();
        assert_eq!(config.gateway.base_url, "https://gateway.example.com");
        assert_eq!(config.gateway.api_token.as_deref(), Some("secret"));
    }
}
