// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock lead store for deterministic importer tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use leadflow_core::traits::{LeadStore, PluginAdapter};
use leadflow_core::types::{AdapterType, HealthStatus};
use leadflow_core::{Lead, LeadDraft, LeadflowError};

use crate::hex_id;

#[derive(Default)]
struct State {
    leads: Vec<Lead>,
    seeded_emails: HashSet<String>,
    lookups: usize,
    insert_calls: usize,
    fail_lookups: bool,
    fail_inserts: bool,
}

/// A lead store held in memory.
#[derive(Clone, Default)]
pub struct MockLeadStore {
    state: Arc<Mutex<State>>,
}

impl MockLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds leads with these emails.
    pub fn with_existing_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seeded_emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .collect();
        Self {
            state: Arc::new(Mutex::new(State {
                seeded_emails,
                ..State::default()
            })),
        }
    }

    /// Make `find_existing_emails` fail.
    pub async fn fail_lookups(&self) {
        self.state.lock().await.fail_lookups = true;
    }

    /// Make `insert_many` fail without storing anything.
    pub async fn fail_inserts(&self) {
        self.state.lock().await.fail_inserts = true;
    }

    /// Every lead inserted so far.
    pub async fn inserted(&self) -> Vec<LeadDraft> {
        self.state
            .lock()
            .await
            .leads
            .iter()
            .map(|l| l.draft.clone())
            .collect()
    }

    /// Number of `find_existing_emails` calls made.
    pub async fn lookup_calls(&self) -> usize {
        self.state.lock().await.lookups
    }

    /// Number of `insert_many` calls made.
    pub async fn insert_calls(&self) -> usize {
        self.state.lock().await.insert_calls
    }
}

#[async_trait]
impl PluginAdapter for MockLeadStore {
    fn name(&self) -> &str {
        "mock-lead-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LeadStore
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadflowError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadflowError> {
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MockLeadStore {
    async fn find_existing_emails(
        &self,
        emails: &[String],
    ) -> Result<HashSet<String>, LeadflowError> {
        let mut state = self.state.lock().await;
        state.lookups += 1;
        if state.fail_lookups {
            return Err(LeadflowError::storage(std::io::Error::other(
                "lead lookup unavailable",
            )));
        }

        let stored: HashSet<String> = state
            .leads
            .iter()
            .filter_map(|l| l.draft.email_key())
            .chain(state.seeded_emails.iter().cloned())
            .collect();
        Ok(emails
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| stored.contains(e))
            .collect())
    }

    async fn insert_many(&self, leads: &[LeadDraft]) -> Result<usize, LeadflowError> {
        let mut state = self.state.lock().await;
        state.insert_calls += 1;
        if state.fail_inserts {
            return Err(LeadflowError::storage(std::io::Error::other(
                "lead insert rejected",
            )));
        }

        let now = Utc::now();
        state.leads.extend(leads.iter().map(|draft| Lead {
            id: hex_id(),
            created_at: now,
            draft: draft.clone(),
        }));
        Ok(leads.len())
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, LeadflowError> {
        Ok(self.state.lock().await.leads.clone())
    }

    async fn delete_all_leads(&self) -> Result<usize, LeadflowError> {
        let mut state = self.state.lock().await;
        let deleted = state.leads.len();
        state.leads.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str) -> LeadDraft {
        let mut draft = LeadDraft::new(None, "DEMO");
        draft.email = email.to_string();
        draft
    }

    #[tokio::test]
    async fn seeded_and_inserted_emails_are_found_case_insensitively() {
        let store = MockLeadStore::with_existing_emails(["Old@X.com"]);
        store.insert_many(&[draft("new@x.com")]).await.unwrap();

        let found = store
            .find_existing_emails(&["OLD@x.com".into(), "NEW@X.COM".into(), "other@x.com".into()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains("old@x.com"));
        assert!(found.contains("new@x.com"));
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let store = MockLeadStore::new();
        store
            .insert_many(&[draft("a@x.com"), draft("b@x.com")])
            .await
            .unwrap();
        assert_eq!(store.delete_all_leads().await.unwrap(), 2);
        assert!(store.list_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_insert_stores_nothing() {
        let store = MockLeadStore::new();
        store.fail_inserts().await;
        assert!(store.insert_many(&[draft("a@x.com")]).await.is_err());
        assert!(store.inserted().await.is_empty());
    }
}
