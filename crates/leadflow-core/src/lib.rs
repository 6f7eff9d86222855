// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Leadflow.
//!
//! This crate provides the error type, the domain types, and the two
//! collaborator traits (user directory and lead store) that the importer
//! is written against. Storage backends and test mocks implement the
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LeadflowError;
pub use types::{
    AdapterType, HealthStatus, ImportReport, Lead, LeadDraft, LeadStatus, NewUser,
    OwnerAssignment, User, UserStatus,
};

pub use traits::{LeadStore, PluginAdapter, UserDirectory};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leadflow_error_variants_render() {
        let storage = LeadflowError::storage(std::io::Error::other("disk full"));
        assert_eq!(storage.to_string(), "storage error: disk full");

        let directory = LeadflowError::Directory {
            message: "duplicate email".into(),
            source: None,
        };
        assert_eq!(directory.to_string(), "user directory error: duplicate email");

        let missing = LeadflowError::MissingInput("no file provided".into());
        assert_eq!(missing.to_string(), "missing input: no file provided");

        let invalid = LeadflowError::InvalidInput("not UTF-8".into());
        assert_eq!(invalid.to_string(), "invalid input: not UTF-8");
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::UserDirectory, AdapterType::LeadStore] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_user_directory<T: UserDirectory>() {}
        fn _assert_lead_store<T: LeadStore>() {}
    }
}
