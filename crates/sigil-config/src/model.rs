// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Sigil.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use sigil_registry::BuildOptions;

/// Top-level Sigil configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SigilConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Plugin discovery and lookup settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin discovery and lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Treat a discovery pass that finds no plugins as a startup failure.
    #[serde(default)]
    pub require_plugins: bool,

    /// Suggest the closest registered name when a lookup misses.
    #[serde(default = "default_suggest_on_miss")]
    pub suggest_on_miss: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            require_plugins: false,
            suggest_on_miss: default_suggest_on_miss(),
        }
    }
}

fn default_suggest_on_miss() -> bool {
    true
}

impl RegistryConfig {
    /// Build options for the registry builder.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            require_plugins: self.require_plugins,
            suggest_on_miss: self.suggest_on_miss,
        }
    }
}
