// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the collaborator traits, the importer, and storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies which collaborator role an adapter plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    UserDirectory,
    LeadStore,
}

// --- Users ---

/// A user as listed by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Account status of a user record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

/// Request to create a user in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub is_admin: bool,
    pub is_account_admin: bool,
}

// --- Leads ---

/// One of the nine canonical pipeline stages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    ColdOutreachSent,
    FollowUpOne,
    FollowUpTwo,
    Responded,
    HandedToAe,
    InDemoProcess,
    Qualified,
    FailClosed,
    SuccessClosed,
}

impl LeadStatus {
    /// All stages in pipeline order.
    pub const ALL: [LeadStatus; 9] = [
        LeadStatus::ColdOutreachSent,
        LeadStatus::FollowUpOne,
        LeadStatus::FollowUpTwo,
        LeadStatus::Responded,
        LeadStatus::HandedToAe,
        LeadStatus::InDemoProcess,
        LeadStatus::Qualified,
        LeadStatus::FailClosed,
        LeadStatus::SuccessClosed,
    ];
}

/// Lead type assigned to imported leads unless configured otherwise.
pub const DEFAULT_LEAD_TYPE: &str = "DEMO";

/// A lead accumulated from one CSV row, not yet persisted.
///
/// Serialized field names follow the stored lead document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDraft {
    #[serde(rename = "v")]
    pub version: i64,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "updatedBy")]
    pub updated_by: Option<String>,
    #[serde(rename = "type")]
    pub lead_type: String,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub lead_source: Option<String>,
    pub website_url: Option<String>,
    pub twitter_username: Option<String>,
    pub linkedin_url: Option<String>,
    pub whatsapp_phone: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
}

impl LeadDraft {
    /// A draft carrying only the required defaults.
    pub fn new(acting_user: Option<&str>, lead_type: &str) -> Self {
        Self {
            version: 1,
            created_by: acting_user.map(str::to_string),
            updated_by: acting_user.map(str::to_string),
            lead_type: lead_type.to_string(),
            status: None,
            assigned_to: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: None,
            lead_source: None,
            website_url: None,
            twitter_username: None,
            linkedin_url: None,
            whatsapp_phone: None,
            start_date: None,
        }
    }

    /// Lowercased email used as the deduplication key, if any.
    pub fn email_key(&self) -> Option<String> {
        let key = self.email.trim().to_lowercase();
        if key.is_empty() { None } else { Some(key) }
    }
}

/// A lead read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: LeadDraft,
}

// --- Import report ---

/// Number of imported leads assigned to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerAssignment {
    /// Owner label (name, else email, else raw id); `None` for unassigned leads.
    pub owner: Option<String>,
    pub count: usize,
}

/// Aggregate outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub message: String,
    pub inserted: usize,
    pub skipped: usize,
    pub total_parsed: usize,
    pub errors: Vec<String>,
    pub new_users_created: Vec<String>,
    pub owner_assignments: Vec<OwnerAssignment>,
}

impl ImportReport {
    /// Human-readable one-line summary of the counts.
    pub fn summary_line(inserted: usize, skipped: usize, created: usize) -> String {
        format!(
            "Inserted {inserted} new leads. Skipped {skipped} existing. Created {created} new users."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn lead_status_round_trips_through_strings() {
        for status in LeadStatus::ALL {
            let s = status.to_string();
            assert_eq!(LeadStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(LeadStatus::HandedToAe.to_string(), "HANDED_TO_AE");
        assert_eq!(LeadStatus::SuccessClosed.to_string(), "SUCCESS_CLOSED");
    }

    #[test]
    fn lead_status_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&LeadStatus::FollowUpOne).unwrap();
        assert_eq!(json, "\"FOLLOW_UP_ONE\"");
    }

    #[test]
    fn new_draft_carries_required_defaults() {
        let draft = LeadDraft::new(Some("u1"), DEFAULT_LEAD_TYPE);
        assert_eq!(draft.version, 1);
        assert_eq!(draft.created_by.as_deref(), Some("u1"));
        assert_eq!(draft.updated_by.as_deref(), Some("u1"));
        assert_eq!(draft.lead_type, "DEMO");
        assert!(draft.status.is_none());
        assert!(draft.assigned_to.is_none());
        assert!(draft.email.is_empty());
    }

    #[test]
    fn email_key_lowercases_and_ignores_blank() {
        let mut draft = LeadDraft::new(None, DEFAULT_LEAD_TYPE);
        assert_eq!(draft.email_key(), None);
        draft.email = "  John@X.com ".into();
        assert_eq!(draft.email_key().as_deref(), Some("john@x.com"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = ImportReport {
            total_parsed: 3,
            new_users_created: vec!["Jane".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["totalParsed"], 3);
        assert_eq!(value["newUsersCreated"][0], "Jane");
        assert!(value.get("ownerAssignments").is_some());
    }

    #[test]
    fn draft_uses_document_field_names() {
        let draft = LeadDraft::new(Some("u1"), DEFAULT_LEAD_TYPE);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["type"], "DEMO");
        assert_eq!(value["createdBy"], "u1");
        assert!(value["status"].is_null());
    }
}
