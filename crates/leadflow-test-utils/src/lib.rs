// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Leadflow.
//!
//! In-memory implementations of the collaborator traits, so importer tests
//! run without a database.
//!
//! # Components
//!
//! - [`MockUserDirectory`] - user directory with creation capture and failure injection
//! - [`MockLeadStore`] - lead store with pre-seeded emails and insert capture

pub mod mock_directory;
pub mod mock_store;

pub use mock_directory::MockUserDirectory;
pub use mock_store::MockLeadStore;

/// Generate a 24-character lowercase hex id, the shape user and lead ids take.
pub fn hex_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..24].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_id_has_user_id_shape() {
        let id = hex_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
