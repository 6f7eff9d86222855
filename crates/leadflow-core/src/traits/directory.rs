// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User directory collaborator.

use async_trait::async_trait;

use crate::error::LeadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewUser, User};

/// Source of known users and sink for users created during an import.
#[async_trait]
pub trait UserDirectory: PluginAdapter {
    /// Snapshot of every known user.
    async fn list_users(&self) -> Result<Vec<User>, LeadflowError>;

    /// Creates a user and returns the stored record with its assigned id.
    async fn create_user(&self, user: &NewUser) -> Result<User, LeadflowError>;
}
