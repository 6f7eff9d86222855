// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./leadflow.toml` > `~/.config/leadflow/leadflow.toml` >
//! `/etc/leadflow/leadflow.toml`, with `LEADFLOW_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LeadflowConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/leadflow/leadflow.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "leadflow.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("leadflow/leadflow.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadflow/leadflow.toml`
/// 3. `~/.config/leadflow/leadflow.toml`
/// 4. `./leadflow.toml`
/// 5. `LEADFLOW_*` environment variables
pub fn load_config() -> Result<LeadflowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string, without files or env vars.
pub fn load_config_from_str(toml_content: &str) -> Result<LeadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `LEADFLOW_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys such as
/// `database_path` contain underscores themselves.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("LEADFLOW_").map(|key| {
        key.as_str()
            .replacen("storage_", "storage.", 1)
            .replacen("import_", "import.", 1)
            .replacen("logging_", "logging.", 1)
            .into()
    })
}
