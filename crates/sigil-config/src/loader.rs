// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sigil.toml` > `~/.config/sigil/sigil.toml` > `/etc/sigil/sigil.toml`
//! with environment variable overrides via `SIGIL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SigilConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sigil/sigil.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sigil.toml";

/// Top-level sections, used to turn `SIGIL_SECTION_KEY` into `section.key`.
const SECTIONS: &[&str] = &["logging", "registry"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sigil/sigil.toml` (system-wide)
/// 3. `~/.config/sigil/sigil.toml` (user XDG config)
/// 4. `./sigil.toml` (local directory)
/// 5. `SIGIL_*` environment variables
pub fn load_config() -> Result<SigilConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SigilConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SigilConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SigilConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SigilConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SigilConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/sigil/sigil.toml`, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sigil").join("sigil.toml"))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing keys
/// survive: `SIGIL_REGISTRY_REQUIRE_PLUGINS` must map to `registry.require_plugins`,
/// not `registry.require.plugins`.
fn env_provider() -> Env {
    Env::prefixed("SIGIL_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name onto a dotted config key.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
