// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV export of stored leads.
//!
//! Columns use the same headers the importer recognizes, and the owner
//! column carries the owner id, so an export can be re-imported. Values
//! containing commas are quoted by the writer; the importer does not
//! understand quoting, so such values will not survive a round trip.

use std::io::Write;

use chrono::SecondsFormat;
use leadflow_core::{Lead, LeadflowError};

use crate::fields::{LeadField, export_header};

const COLUMNS: [LeadField; 12] = [
    LeadField::FirstName,
    LeadField::LastName,
    LeadField::Email,
    LeadField::Phone,
    LeadField::LeadSource,
    LeadField::Status,
    LeadField::WebsiteUrl,
    LeadField::TwitterUsername,
    LeadField::LinkedinUrl,
    LeadField::StartDate,
    LeadField::WhatsappPhone,
    LeadField::AssignedTo,
];

/// Write `leads` as CSV to `writer`. Returns the number of data rows written.
pub fn write_leads_csv<W: Write>(leads: &[Lead], writer: W) -> Result<usize, LeadflowError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(COLUMNS.iter().map(|f| export_header(*f)))
        .map_err(export_err)?;

    for lead in leads {
        out.write_record(COLUMNS.iter().map(|f| cell(lead, *f)))
            .map_err(export_err)?;
    }

    out.flush()
        .map_err(|e| LeadflowError::Internal(format!("csv export failed: {e}")))?;
    Ok(leads.len())
}

fn cell(lead: &Lead, field: LeadField) -> String {
    let draft = &lead.draft;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    match field {
        LeadField::FirstName => draft.first_name.clone(),
        LeadField::LastName => draft.last_name.clone(),
        LeadField::Email => draft.email.clone(),
        LeadField::Phone => opt(&draft.phone),
        LeadField::LeadSource => opt(&draft.lead_source),
        LeadField::Status => draft.status.map(|s| s.to_string()).unwrap_or_default(),
        LeadField::WebsiteUrl => opt(&draft.website_url),
        LeadField::TwitterUsername => opt(&draft.twitter_username),
        LeadField::LinkedinUrl => opt(&draft.linkedin_url),
        LeadField::StartDate => draft
            .start_date
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default(),
        LeadField::WhatsappPhone => opt(&draft.whatsapp_phone),
        LeadField::AssignedTo => opt(&draft.assigned_to),
    }
}

fn export_err(e: csv::Error) -> LeadflowError {
    LeadflowError::Internal(format!("csv export failed: {e}"))
}
