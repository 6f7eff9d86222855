// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express. All failures are collected
//! rather than stopping at the first one.

use crate::diagnostic::ConfigError;
use crate::model::LeadflowConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &LeadflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let domain = config.import.generated_email_domain.trim();
    if domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        fail(format!(
            "import.generated_email_domain `{domain}` must be a bare domain such as `company.com`"
        ));
    }

    if config.import.default_lead_type.trim().is_empty() {
        fail("import.default_lead_type must not be empty".to_string());
    }

    if config.import.max_file_bytes == 0 {
        fail("import.max_file_bytes must be greater than zero".to_string());
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
