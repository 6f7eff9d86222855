// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from HubSpot export headers to lead fields, and date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A lead field that an import column can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    FirstName,
    LastName,
    Email,
    Phone,
    LeadSource,
    Status,
    WebsiteUrl,
    TwitterUsername,
    LinkedinUrl,
    StartDate,
    WhatsappPhone,
    AssignedTo,
}

/// Recognized headers. Matching is exact and case-sensitive.
pub const FIELD_MAP: &[(&str, LeadField)] = &[
    ("First Name", LeadField::FirstName),
    ("Last Name", LeadField::LastName),
    ("Email", LeadField::Email),
    ("Phone Number", LeadField::Phone),
    ("Lead Source Channel", LeadField::LeadSource),
    ("Lead Stage", LeadField::Status),
    ("Lead Status", LeadField::Status),
    ("Website URL", LeadField::WebsiteUrl),
    ("Twitter Username", LeadField::TwitterUsername),
    ("LinkedIn URL", LeadField::LinkedinUrl),
    ("Create Date", LeadField::StartDate),
    ("WhatsApp Phone Number", LeadField::WhatsappPhone),
    ("Contact owner", LeadField::AssignedTo),
    ("Contact Owner", LeadField::AssignedTo),
];

/// The field a header maps to, if it is recognized.
pub fn field_for_header(header: &str) -> Option<LeadField> {
    FIELD_MAP
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, field)| *field)
}

/// The header written for a field on export.
pub fn export_header(field: LeadField) -> &'static str {
    match field {
        LeadField::Status => "Lead Stage",
        LeadField::AssignedTo => "Contact Owner",
        other => FIELD_MAP
            .iter()
            .find(|(_, f)| *f == other)
            .map_or("", |(name, _)| *name),
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%b %d %Y %H:%M:%S",
];

// `%b` also accepts full month names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

/// Parse a `Create Date` cell. Naive values are taken as UTC.
///
/// Accepts RFC 3339, ISO and US numeric dates with or without a time, and
/// English month-name dates (`Mar 5, 2024`, `March 5 2024`, `5 Mar 2024`,
/// `Tue Mar 05 2024`). Note that rows are split on every comma, so a
/// `Mar 5, 2024` cell only reaches this function intact when the export
/// omits the comma. Returns `None` for anything unparsable; callers leave
/// the field unset.
pub fn parse_start_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn both_owner_header_spellings_map() {
        assert_eq!(field_for_header("Contact owner"), Some(LeadField::AssignedTo));
        assert_eq!(field_for_header("Contact Owner"), Some(LeadField::AssignedTo));
    }

    #[test]
    fn header_match_is_case_sensitive() {
        assert_eq!(field_for_header("email"), None);
        assert_eq!(field_for_header("Email"), Some(LeadField::Email));
    }

    #[test]
    fn stage_and_status_headers_both_map_to_status() {
        assert_eq!(field_for_header("Lead Stage"), Some(LeadField::Status));
        assert_eq!(field_for_header("Lead Status"), Some(LeadField::Status));
    }

    #[test]
    fn export_headers_reimport() {
        for (_, field) in FIELD_MAP {
            assert_eq!(field_for_header(export_header(*field)), Some(*field));
        }
    }

    #[test]
    fn parses_hubspot_create_date() {
        let dt = parse_start_date("2024-03-05 14:30").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5));
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_start_date("2024-03-05T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn parses_us_date() {
        let dt = parse_start_date("12/31/2023").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 31));
    }

    #[test]
    fn parses_month_name_dates() {
        for text in ["Mar 5, 2024", "March 5, 2024", "March 5 2024", "5 Mar 2024", "Tue Mar 05 2024"] {
            let dt = parse_start_date(text).unwrap_or_else(|| panic!("{text} should parse"));
            assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5), "{text}");
        }
        let dt = parse_start_date("Mar 5, 2024 14:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
    }

    #[test]
    fn month_name_date_reaches_draft_without_comma() {
        let table = crate::rows::CsvTable::parse("Create Date\nMar 5 2024\n");
        let (_, cell) = table.cells(&table.rows[0]).next().unwrap();
        assert!(parse_start_date(cell).is_some());
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_start_date("last tuesday").is_none());
        assert!(parse_start_date("2024-13-45").is_none());
    }
}
