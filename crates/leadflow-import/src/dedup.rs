// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email-based deduplication of candidate leads.

use std::collections::HashSet;

use leadflow_core::LeadDraft;

/// Candidates that survived deduplication, and how many were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deduplicated {
    pub leads: Vec<LeadDraft>,
    pub skipped: usize,
}

/// Distinct non-empty lowercased emails, in first-seen order.
pub fn candidate_emails(leads: &[LeadDraft]) -> Vec<String> {
    let mut seen = HashSet::new();
    leads
        .iter()
        .filter_map(LeadDraft::email_key)
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

/// Drop candidates whose email is already stored or already appeared
/// earlier in the batch. Candidates without an email are always kept.
///
/// `existing` must hold lowercased emails.
pub fn drop_duplicates(leads: Vec<LeadDraft>, existing: &HashSet<String>) -> Deduplicated {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(leads.len());
    let mut skipped = 0;

    for lead in leads {
        let duplicate = lead
            .email_key()
            .is_some_and(|key| existing.contains(&key) || !seen.insert(key));
        if duplicate {
            skipped += 1;
        } else {
            kept.push(lead);
        }
    }

    Deduplicated {
        leads: kept,
        skipped,
    }
}
