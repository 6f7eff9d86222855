// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end import run: normalize, deduplicate, bulk insert, report.

use std::sync::Arc;

use leadflow_core::{
    ImportReport, LeadDraft, LeadStore, LeadflowError, OwnerAssignment, UserDirectory,
};
use tracing::{debug, info};

use crate::dedup::{candidate_emails, drop_duplicates};
use crate::normalizer::{ImportSettings, Normalizer};
use crate::owner::OwnerDirectory;

/// Drives one CSV upload through the user directory and lead store.
pub struct LeadImporter {
    directory: Arc<dyn UserDirectory>,
    store: Arc<dyn LeadStore>,
    normalizer: Normalizer,
}

impl LeadImporter {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn LeadStore>,
        settings: ImportSettings,
    ) -> Self {
        Self {
            directory,
            store,
            normalizer: Normalizer::new(settings),
        }
    }

    /// Import one uploaded CSV file.
    ///
    /// Empty input is rejected before anything is read from the
    /// collaborators. Store failures (the existence check or the insert)
    /// abort the whole run and no report is produced. Owner creation
    /// failures do not: they show up in [`ImportReport::errors`].
    pub async fn import(&self, csv_text: &str) -> Result<ImportReport, LeadflowError> {
        if csv_text.trim().is_empty() {
            return Err(LeadflowError::MissingInput("no file provided".to_string()));
        }

        let users = self.directory.list_users().await?;
        debug!(users = users.len(), "loaded user directory snapshot");
        let mut owners = OwnerDirectory::new(users);

        let batch = self
            .normalizer
            .normalize(csv_text, &mut owners, self.directory.as_ref())
            .await;
        let total_parsed = batch.leads.len();

        let emails = candidate_emails(&batch.leads);
        let existing = if emails.is_empty() {
            Default::default()
        } else {
            self.store.find_existing_emails(&emails).await?
        };
        let deduplicated = drop_duplicates(batch.leads, &existing);

        let inserted = if deduplicated.leads.is_empty() {
            0
        } else {
            self.store.insert_many(&deduplicated.leads).await?
        };

        let owner_assignments = owner_assignments(&deduplicated.leads, &owners);
        let report = ImportReport {
            message: ImportReport::summary_line(
                inserted,
                deduplicated.skipped,
                batch.new_users_created.len(),
            ),
            inserted,
            skipped: deduplicated.skipped,
            total_parsed,
            errors: batch.errors,
            new_users_created: batch.new_users_created,
            owner_assignments,
        };

        info!(
            total_parsed = report.total_parsed,
            inserted = report.inserted,
            skipped = report.skipped,
            new_users = report.new_users_created.len(),
            errors = report.errors.len(),
            "lead import complete"
        );
        Ok(report)
    }
}

/// Count leads per owner in first-seen order, labelled for display.
fn owner_assignments(leads: &[LeadDraft], owners: &OwnerDirectory) -> Vec<OwnerAssignment> {
    let mut counts: Vec<(Option<&str>, usize)> = Vec::new();
    for lead in leads {
        let owner = lead.assigned_to.as_deref();
        match counts.iter_mut().find(|(id, _)| *id == owner) {
            Some((_, count)) => *count += 1,
            None => counts.push((owner, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(id, count)| OwnerAssignment {
            owner: id.map(|id| owners.label(id)),
            count,
        })
        .collect()
}
