// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadflow import` command implementation.

use std::path::Path;
use std::sync::Arc;

use leadflow_config::LeadflowConfig;
use leadflow_core::{ImportReport, LeadflowError};
use leadflow_import::{ImportSettings, LeadImporter};
use leadflow_storage::SqliteStorage;
use tracing::info;

/// Run `leadflow import`.
pub async fn run_import(
    config: &LeadflowConfig,
    storage: &Arc<SqliteStorage>,
    file: &Path,
    as_user: Option<String>,
    json: bool,
) -> Result<(), LeadflowError> {
    let text = read_upload(file, config.import.max_file_bytes)?;
    info!(file = %file.display(), bytes = text.len(), "importing leads");

    let settings = ImportSettings::from_config(&config.import, as_user);
    let importer = LeadImporter::new(storage.clone(), storage.clone(), settings);
    let report = importer.import(&text).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| LeadflowError::Internal(format!("failed to render report: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Read the uploaded file, refusing missing, oversized, or non-UTF-8 input.
pub fn read_upload(path: &Path, max_bytes: u64) -> Result<String, LeadflowError> {
    let metadata = std::fs::metadata(path).map_err(|_| {
        LeadflowError::MissingInput(format!("no file provided at {}", path.display()))
    })?;
    if !metadata.is_file() {
        return Err(LeadflowError::MissingInput(format!(
            "{} is not a file",
            path.display()
        )));
    }
    if metadata.len() > max_bytes {
        return Err(LeadflowError::InvalidInput(format!(
            "{} is {} bytes, larger than the {max_bytes} byte limit",
            path.display(),
            metadata.len()
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        LeadflowError::MissingInput(format!("cannot read {}: {e}", path.display()))
    })?;
    String::from_utf8(bytes)
        .map_err(|_| LeadflowError::InvalidInput(format!("{} is not UTF-8 text", path.display())))
}

/// Plain-text rendering of an import report.
pub fn render_report(report: &ImportReport) -> String {
    let mut out = format!("{}\n", report.message);
    out.push_str(&format!("  parsed rows: {}\n", report.total_parsed));

    if !report.new_users_created.is_empty() {
        out.push_str("  new users:\n");
        for name in &report.new_users_created {
            out.push_str(&format!("    {name}\n"));
        }
    }

    if !report.owner_assignments.is_empty() {
        out.push_str("  owner assignments:\n");
        for assignment in &report.owner_assignments {
            let owner = assignment.owner.as_deref().unwrap_or("Unassigned");
            out.push_str(&format!("    {owner:<30} {}\n", assignment.count));
        }
    }

    if !report.errors.is_empty() {
        out.push_str(&format!("  errors ({}):\n", report.errors.len()));
        for error in &report.errors {
            out.push_str(&format!("    {error}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow_core::OwnerAssignment;

    #[test]
    fn missing_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(&dir.path().join("absent.csv"), 1024).unwrap_err();
        assert!(matches!(err, LeadflowError::MissingInput(_)));
    }

    #[test]
    fn directory_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(dir.path(), 1024).unwrap_err();
        assert!(matches!(err, LeadflowError::MissingInput(_)));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        std::fs::write(&path, "Email\na@b.c\n").unwrap();
        let err = read_upload(&path, 4).unwrap_err();
        assert!(matches!(err, LeadflowError::InvalidInput(_)));
    }

    #[test]
    fn non_utf8_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, [b'E', 0xff, b'\n']).unwrap();
        let err = read_upload(&path, 1024).unwrap_err();
        assert!(matches!(err, LeadflowError::InvalidInput(_)));
    }

    #[test]
    fn readable_file_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        std::fs::write(&path, "Email\na@b.c\n").unwrap();
        assert_eq!(read_upload(&path, 1024).unwrap(), "Email\na@b.c\n");
    }

    #[test]
    fn report_lists_users_owners_and_errors() {
        let report = ImportReport {
            message: ImportReport::summary_line(2, 1, 1),
            inserted: 2,
            skipped: 1,
            total_parsed: 3,
            errors: vec!["Failed to create user for contact owner: Pat".into()],
            new_users_created: vec!["Jane Smith".into()],
            owner_assignments: vec![
                OwnerAssignment {
                    owner: Some("Jane Smith".into()),
                    count: 1,
                },
                OwnerAssignment {
                    owner: None,
                    count: 1,
                },
            ],
        };
        let text = render_report(&report);
        assert!(text.starts_with("Inserted 2 new leads. Skipped 1 existing. Created 1 new users.\n"));
        assert!(text.contains("    Jane Smith\n"));
        assert!(text.contains("Unassigned"));
        assert!(text.contains("errors (1):"));
    }
}
