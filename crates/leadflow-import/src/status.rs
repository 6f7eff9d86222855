// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text pipeline stage normalization.
//!
//! Stage text from exports varies ("Closed - Won", "follow up 1", "Replied").
//! It is folded into an alias key and looked up in a fixed table; anything not
//! in the table becomes `None`.

use std::sync::LazyLock;

use leadflow_core::LeadStatus;
use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9]+").expect("static regex"));

/// Fold stage text into an alias key: uppercase, collapse every run of
/// non-alphanumerics to `_`, and strip leading and trailing `_`.
pub fn alias_key(text: &str) -> String {
    let upper = text.trim().to_uppercase();
    NON_ALPHANUMERIC
        .replace_all(&upper, "_")
        .trim_matches('_')
        .to_string()
}

/// Canonical stage for an alias key.
pub fn lookup_alias(key: &str) -> Option<LeadStatus> {
    use LeadStatus::*;

    let status = match key {
        "COLD_OUTREACH_SENT" | "OUTREACH_SENT" | "NEW_LEAD" | "NEW" => ColdOutreachSent,
        "RESPONDED" | "REPLIED" => Responded,
        "FOLLOW_UP_1" | "FOLLOW_UP_ONE" | "FOLLOWUP_ONE" => FollowUpOne,
        "FOLLOW_UP_2" | "FOLLOW_UP_TWO" | "FOLLOWUP_TWO" => FollowUpTwo,
        "HANDED_TO_AE" | "HANDOFF_TO_AE" => HandedToAe,
        "IN_DEMO_PROCESS" | "DEMO" => InDemoProcess,
        "QUALIFIED" => Qualified,
        "FAIL_CLOSED" | "FAILED" | "LOST" => FailClosed,
        "SUCCESS_CLOSED" | "WON" | "CLOSED_WON" => SuccessClosed,
        _ => return None,
    };
    Some(status)
}

/// Normalize a stage cell to a canonical stage, or `None` if unrecognized.
pub fn normalize_status(text: &str) -> Option<LeadStatus> {
    lookup_alias(&alias_key(text))
}
