// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadflow doctor` command implementation.
//!
//! Checks that configuration is usable and that the lead database opens,
//! migrates, and answers queries.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use leadflow_config::LeadflowConfig;
use leadflow_core::{HealthStatus, LeadStore, LeadflowError, PluginAdapter, UserDirectory};

use crate::open_storage;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run `leadflow doctor`. Fails when any check fails.
pub async fn run_doctor(config: &LeadflowConfig, plain: bool) -> Result<(), LeadflowError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = vec![check_config(config), check_database(config).await];

    println!();
    println!("  leadflow doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Pass => {}
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
        }
        println!("{}", format_line(result, use_color));
    }
    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    if fail_count > 0 {
        return Err(LeadflowError::Internal(format!(
            "{fail_count} doctor check(s) failed"
        )));
    }
    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    let (symbol, message) = if use_color {
        match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        }
    } else {
        let marker = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        (marker.normal(), result.message.normal())
    };
    format!(
        "    {symbol} {:<20} {message} ({duration_ms}ms)",
        result.name
    )
}

/// The config was already loaded and validated; report what it points at.
fn check_config(config: &LeadflowConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult {
        name: "Configuration".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "valid (owner emails @{}, lead type {})",
            config.import.generated_email_domain, config.import.default_lead_type
        ),
        duration: start.elapsed(),
    }
}

/// Open the database, run the health query, and count rows.
async fn check_database(config: &LeadflowConfig) -> CheckResult {
    let start = Instant::now();
    let db_path = &config.storage.database_path;
    let existed = std::path::Path::new(db_path).exists();

    let storage = match open_storage(config).await {
        Ok(storage) => storage,
        Err(e) => {
            return CheckResult {
                name: "Database".to_string(),
                status: CheckStatus::Fail,
                message: format!("open failed: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    let result = match storage.health_check().await {
        Ok(HealthStatus::Healthy) => {
            let users = storage.list_users().await.map(|u| u.len());
            let leads = storage.list_leads().await.map(|l| l.len());
            match (users, leads) {
                (Ok(users), Ok(leads)) => CheckResult {
                    name: "Database".to_string(),
                    status: if existed {
                        CheckStatus::Pass
                    } else {
                        CheckStatus::Warn
                    },
                    message: if existed {
                        format!("{db_path}: {users} users, {leads} leads")
                    } else {
                        format!("{db_path}: created empty database")
                    },
                    duration: start.elapsed(),
                },
                (Err(e), _) | (_, Err(e)) => CheckResult {
                    name: "Database".to_string(),
                    status: CheckStatus::Fail,
                    message: format!("query failed: {e}"),
                    duration: start.elapsed(),
                },
            }
        }
        Ok(HealthStatus::Degraded(reason)) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Warn,
            message: reason,
            duration: start.elapsed(),
        },
        Ok(HealthStatus::Unhealthy(reason)) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Fail,
            message: reason,
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Fail,
            message: format!("health check failed: {e}"),
            duration: start.elapsed(),
        },
    };

    if let Err(e) = storage.shutdown().await {
        tracing::warn!(error = %e, "database shutdown failed");
    }
    result
}
