// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Leadflow configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadflowConfig {
    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// CSV import settings.
    #[serde(default)]
    pub import: ImportConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("leadflow").join("leadflow.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("leadflow.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Lead import configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Domain used to synthesize emails for contact owners created during import.
    #[serde(default = "default_generated_email_domain")]
    pub generated_email_domain: String,

    /// `type` stamped on every imported lead.
    #[serde(default = "default_lead_type")]
    pub default_lead_type: String,

    /// Largest CSV file accepted by the CLI, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            generated_email_domain: default_generated_email_domain(),
            default_lead_type: default_lead_type(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_generated_email_domain() -> String {
    "company.com".to_string()
}

fn default_lead_type() -> String {
    "DEMO".to_string()
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
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
