// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side and maintenance commands: `export`, `delete-all`, `summary`, `users`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use leadflow_core::{LeadStore, LeadflowError, UserDirectory};
use leadflow_import::export::write_leads_csv;
use leadflow_import::{PipelineSummary, summarize};
use leadflow_storage::SqliteStorage;
use tracing::info;

/// Run `leadflow export`.
pub async fn run_export(storage: &SqliteStorage, output: Option<&Path>) -> Result<(), LeadflowError> {
    let leads = storage.list_leads().await?;
    let written = match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LeadflowError::Internal(format!("cannot create {}: {e}", path.display()))
            })?;
            let written = write_leads_csv(&leads, BufWriter::new(file))?;
            eprintln!("Exported {written} leads to {}", path.display());
            written
        }
        None => write_leads_csv(&leads, std::io::stdout().lock())?,
    };
    info!(written, "leads exported");
    Ok(())
}

/// Run `leadflow delete-all`.
pub async fn run_delete_all(storage: &SqliteStorage) -> Result<(), LeadflowError> {
    let deleted = storage.delete_all_leads().await?;
    info!(deleted, "all leads deleted");
    println!("Deleted {deleted} leads.");
    Ok(())
}

/// Run `leadflow summary`.
pub async fn run_summary(storage: &SqliteStorage, json: bool) -> Result<(), LeadflowError> {
    let leads = storage.list_leads().await?;
    let users = storage.list_users().await?;
    let summary = summarize(&leads, &users, Utc::now());

    if json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| LeadflowError::Internal(format!("failed to render summary: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

/// Run `leadflow users`.
pub async fn run_users(storage: &SqliteStorage) -> Result<(), LeadflowError> {
    let users = storage.list_users().await?;
    let mut out = std::io::stdout().lock();
    for user in &users {
        writeln!(
            out,
            "{}  {:<32} {}",
            user.id,
            user.email,
            user.name.as_deref().unwrap_or("")
        )
        .map_err(|e| LeadflowError::Internal(format!("failed to write output: {e}")))?;
    }
    Ok(())
}

fn render_summary(summary: &PipelineSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total leads:        {}\n", summary.total));
    out.push_str(&format!("New this week:      {}\n", summary.new_this_week));
    out.push_str(&format!("Active stages:      {}\n", summary.active_stages));
    out.push_str(&format!(
        "Won (all/week/day): {}/{}/{}\n",
        summary.success_closed.all, summary.success_closed.this_week, summary.success_closed.today
    ));

    out.push_str("\nStages:\n");
    for stage in &summary.stages {
        out.push_str(&format!("  {:<22} {}\n", stage.stage.to_string(), stage.count));
    }
    if summary.unstaged > 0 {
        out.push_str(&format!("  {:<22} {}\n", "(no stage)", summary.unstaged));
    }

    out.push_str("\nOwners:\n");
    if summary.owners.is_empty() {
        out.push_str("  (none)\n");
    }
    for owner in &summary.owners {
        out.push_str(&format!("  {:<22} {}\n", owner.owner, owner.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_renders_every_stage() {
        let summary = summarize(&[], &[], Utc::now());
        let text = render_summary(&summary);
        assert!(text.contains("Total leads:        0"));
        assert!(text.contains("COLD_OUTREACH_SENT"));
        assert!(text.contains("SUCCESS_CLOSED"));
        assert!(!text.contains("(no stage)"));
    }
}
