// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-by-row transformation of CSV text into lead drafts.
//!
//! Rows are processed strictly in file order. Owner creation is awaited
//! before the next field is touched, and created owners are registered in
//! the [`OwnerDirectory`] immediately, so two rows naming the same unknown
//! owner produce one user.

use leadflow_config::model::ImportConfig;
use leadflow_core::types::DEFAULT_LEAD_TYPE;
use leadflow_core::{LeadDraft, NewUser, User, UserDirectory, UserStatus};
use tracing::{debug, warn};

use crate::fields::{LeadField, field_for_header, parse_start_date};
use crate::owner::{OwnerDirectory, OwnerLookup, synthesized_email};
use crate::rows::CsvTable;
use crate::status::normalize_status;

/// Per-run import settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// User recorded as `createdBy`/`updatedBy` on every draft.
    pub acting_user: Option<String>,
    /// Lead `type` stamped on every draft.
    pub lead_type: String,
    /// Domain for emails synthesized for newly created owners.
    pub generated_email_domain: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            acting_user: None,
            lead_type: DEFAULT_LEAD_TYPE.to_string(),
            generated_email_domain: "company.com".to_string(),
        }
    }
}

impl ImportSettings {
    pub fn from_config(config: &ImportConfig, acting_user: Option<String>) -> Self {
        Self {
            acting_user,
            lead_type: config.default_lead_type.clone(),
            generated_email_domain: config.generated_email_domain.clone(),
        }
    }
}

/// Candidate leads plus the row-level diagnostics of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    /// One draft per non-blank data row, in file order.
    pub leads: Vec<LeadDraft>,
    /// Row-level errors. Only owner creation failures land here.
    pub errors: Vec<String>,
    /// Names of owners created during the pass, in creation order.
    pub new_users_created: Vec<String>,
}

/// Turns CSV text into lead drafts.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    settings: ImportSettings,
}

impl Normalizer {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    /// Normalize every non-blank data row of `csv_text`.
    ///
    /// Nothing here fails the run: unparsable dates and unknown stages are
    /// dropped silently, and a failed owner creation is recorded as a row
    /// error while the row itself is kept.
    pub async fn normalize(
        &self,
        csv_text: &str,
        owners: &mut OwnerDirectory,
        directory: &dyn UserDirectory,
    ) -> NormalizedBatch {
        let table = CsvTable::parse(csv_text);
        let mut batch = NormalizedBatch::default();

        for row in &table.rows {
            let mut draft = LeadDraft::new(
                self.settings.acting_user.as_deref(),
                &self.settings.lead_type,
            );

            for (header, value) in table.cells(row) {
                let Some(field) = field_for_header(header) else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                self.apply(field, value, &mut draft, owners, directory, &mut batch)
                    .await;
            }

            batch.leads.push(draft);
        }

        batch
    }

    async fn apply(
        &self,
        field: LeadField,
        value: &str,
        draft: &mut LeadDraft,
        owners: &mut OwnerDirectory,
        directory: &dyn UserDirectory,
        batch: &mut NormalizedBatch,
    ) {
        let text = || Some(value.to_string());
        match field {
            LeadField::FirstName => draft.first_name = value.to_string(),
            LeadField::LastName => draft.last_name = value.to_string(),
            LeadField::Email => draft.email = value.to_string(),
            LeadField::Phone => draft.phone = text(),
            LeadField::LeadSource => draft.lead_source = text(),
            LeadField::WebsiteUrl => draft.website_url = text(),
            LeadField::TwitterUsername => draft.twitter_username = text(),
            LeadField::LinkedinUrl => draft.linkedin_url = text(),
            LeadField::WhatsappPhone => draft.whatsapp_phone = text(),
            LeadField::StartDate => {
                if let Some(date) = parse_start_date(value) {
                    draft.start_date = Some(date);
                }
            }
            // An unknown stage overwrites any earlier stage column with None.
            LeadField::Status => draft.status = normalize_status(value),
            // A miss keeps whatever an earlier owner column resolved.
            LeadField::AssignedTo => {
                if let Some(id) = self.resolve_owner(value, owners, directory, batch).await {
                    draft.assigned_to = Some(id);
                }
            }
        }
    }

    /// Resolve an owner cell to a user id, creating the user when nothing matches.
    async fn resolve_owner(
        &self,
        value: &str,
        owners: &mut OwnerDirectory,
        directory: &dyn UserDirectory,
        batch: &mut NormalizedBatch,
    ) -> Option<String> {
        let raw = value.trim();
        if raw.is_empty() {
            return None;
        }

        match owners.lookup(raw) {
            OwnerLookup::Found { id, via } => {
                debug!(owner = raw, %id, ?via, "owner resolved");
                Some(id)
            }
            OwnerLookup::UnknownEmail => {
                debug!(owner = raw, "no user with this email; leaving lead unassigned");
                None
            }
            OwnerLookup::Unresolved => {
                let new_user = NewUser {
                    name: raw.to_string(),
                    email: synthesized_email(raw, &self.settings.generated_email_domain),
                    status: UserStatus::Active,
                    is_admin: false,
                    is_account_admin: false,
                };
                match directory.create_user(&new_user).await {
                    Ok(created) => {
                        debug!(owner = raw, id = %created.id, email = %created.email, "created owner");
                        let id = created.id.clone();
                        owners.register(User {
                            id: created.id,
                            email: created.email,
                            name: created.name.or(Some(new_user.name)),
                        });
                        batch.new_users_created.push(raw.to_string());
                        Some(id)
                    }
                    Err(e) => {
                        warn!(owner = raw, error = %e, "failed to create contact owner");
                        batch
                            .errors
                            .push(format!("Failed to create user for contact owner: {raw}"));
                        None
                    }
                }
            }
        }
    }
}
