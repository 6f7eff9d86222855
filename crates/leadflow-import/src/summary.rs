// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline dashboard aggregation over stored leads.

use chrono::{DateTime, Duration, Utc};
use leadflow_core::{Lead, LeadStatus, User};
use serde::Serialize;

/// Label used for leads without an owner or with an owner missing from the directory.
pub const UNASSIGNED: &str = "Unassigned";

/// Count of leads in one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: LeadStatus,
    pub count: usize,
}

/// Count of leads held by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerCount {
    pub owner: String,
    pub count: usize,
}

/// Won deals over a few windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuccessClosed {
    pub all: usize,
    pub this_week: usize,
    pub today: usize,
}

/// Aggregated view of the lead pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub total: usize,
    /// Leads created in the last seven days.
    pub new_this_week: usize,
    /// Distinct open stages (everything except the two closed stages) in use.
    pub active_stages: usize,
    /// Every stage in pipeline order, zero when unused.
    pub stages: Vec<StageCount>,
    /// Leads with no stage.
    pub unstaged: usize,
    /// Leads per owner name, in first-seen order.
    pub owners: Vec<OwnerCount>,
    pub success_closed: SuccessClosed,
}

/// Build the pipeline summary as of `now`.
pub fn summarize(leads: &[Lead], users: &[User], now: DateTime<Utc>) -> PipelineSummary {
    let week_ago = now - Duration::days(7);
    let is_this_week = |lead: &Lead| lead.created_at >= week_ago && lead.created_at <= now;
    let is_today = |lead: &Lead| lead.created_at.date_naive() == now.date_naive();
    let won = |lead: &&Lead| lead.draft.status == Some(LeadStatus::SuccessClosed);

    let stages: Vec<StageCount> = LeadStatus::ALL
        .iter()
        .map(|stage| StageCount {
            stage: *stage,
            count: leads
                .iter()
                .filter(|l| l.draft.status == Some(*stage))
                .count(),
        })
        .collect();

    let active_stages = stages
        .iter()
        .filter(|s| {
            s.count > 0 && !matches!(s.stage, LeadStatus::FailClosed | LeadStatus::SuccessClosed)
        })
        .count();

    let mut owners: Vec<OwnerCount> = Vec::new();
    for lead in leads {
        let name = owner_name(lead, users);
        match owners.iter_mut().find(|o| o.owner == name) {
            Some(entry) => entry.count += 1,
            None => owners.push(OwnerCount {
                owner: name,
                count: 1,
            }),
        }
    }

    PipelineSummary {
        total: leads.len(),
        new_this_week: leads.iter().filter(|&l| is_this_week(l)).count(),
        active_stages,
        stages,
        unstaged: leads.iter().filter(|l| l.draft.status.is_none()).count(),
        owners,
        success_closed: SuccessClosed {
            all: leads.iter().filter(won).count(),
            this_week: leads.iter().filter(won).filter(|&l| is_this_week(l)).count(),
            today: leads.iter().filter(won).filter(|&l| is_today(l)).count(),
        },
    }
}

fn owner_name(lead: &Lead, users: &[User]) -> String {
    lead.draft
        .assigned_to
        .as_deref()
        .and_then(|id| users.iter().find(|u| u.id == id))
        .and_then(|u| u.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNASSIGNED.to_string())
}
