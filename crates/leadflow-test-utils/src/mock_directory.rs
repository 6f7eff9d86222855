// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock user directory for deterministic importer tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leadflow_core::traits::{PluginAdapter, UserDirectory};
use leadflow_core::types::{AdapterType, HealthStatus};
use leadflow_core::{LeadflowError, NewUser, User};

use crate::hex_id;

#[derive(Default)]
struct State {
    users: Vec<User>,
    created: Vec<NewUser>,
    failing_names: HashSet<String>,
    fail_all_creates: bool,
    fail_listing: bool,
}

/// A user directory held in memory.
///
/// Created users get fresh 24-hex ids and are visible to later
/// `list_users` calls. Every creation request is captured for assertions.
#[derive(Clone, Default)]
pub struct MockUserDirectory {
    state: Arc<Mutex<State>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-loaded with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                users,
                ..State::default()
            })),
        }
    }

    /// Make creation fail for the owner called `name` (exact match).
    pub async fn fail_creates_for(&self, name: &str) {
        self.state.lock().await.failing_names.insert(name.to_string());
    }

    /// Make every creation fail.
    pub async fn fail_all_creates(&self) {
        self.state.lock().await.fail_all_creates = true;
    }

    /// Make `list_users` fail.
    pub async fn fail_listing(&self) {
        self.state.lock().await.fail_listing = true;
    }

    /// Current users, including ones created so far.
    pub async fn snapshot(&self) -> Vec<User> {
        self.state.lock().await.users.clone()
    }

    /// Successful creation requests, in order.
    pub async fn created(&self) -> Vec<NewUser> {
        self.state.lock().await.created.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockUserDirectory {
    fn name(&self) -> &str {
        "mock-user-directory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::UserDirectory
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadflowError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadflowError> {
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list_users(&self) -> Result<Vec<User>, LeadflowError> {
        let state = self.state.lock().await;
        if state.fail_listing {
            return Err(LeadflowError::Directory {
                message: "user listing unavailable".to_string(),
                source: None,
            });
        }
        Ok(state.users.clone())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, LeadflowError> {
        let mut state = self.state.lock().await;
        if state.fail_all_creates || state.failing_names.contains(&user.name) {
            return Err(LeadflowError::Directory {
                message: format!("cannot create user {}", user.name),
                source: None,
            });
        }

        let created = User {
            id: hex_id(),
            email: user.email.clone(),
            name: Some(user.name.clone()),
        };
        state.users.push(created.clone());
        state.created.push(user.clone());
        Ok(created)
    }
}
