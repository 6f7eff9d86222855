// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead store collaborator.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::LeadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Lead, LeadDraft};

/// Persistence backend for leads.
#[async_trait]
pub trait LeadStore: PluginAdapter {
    /// Returns the subset of `emails` already stored, lowercased.
    ///
    /// Matching is case-insensitive.
    async fn find_existing_emails(
        &self,
        emails: &[String],
    ) -> Result<HashSet<String>, LeadflowError>;

    /// Inserts all leads or none of them. Returns the number inserted.
    async fn insert_many(&self, leads: &[LeadDraft]) -> Result<usize, LeadflowError>;

    /// Every stored lead, oldest first.
    async fn list_leads(&self) -> Result<Vec<Lead>, LeadflowError>;

    /// Removes every stored lead and returns how many were deleted.
    async fn delete_all_leads(&self) -> Result<usize, LeadflowError>;
}
