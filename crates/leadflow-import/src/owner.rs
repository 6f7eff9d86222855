// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact-owner resolution against a per-run user index.
//!
//! The index is built once from the user directory snapshot and grows as
//! owners are created during the run, so a later row naming the same new
//! owner resolves to the user an earlier row created.

use std::collections::HashMap;

use leadflow_core::User;

/// How an owner cell was matched to a user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerMatch {
    /// The cell was already a 24-character hex user id.
    UserId,
    /// Exact case-insensitive email match.
    Email,
    /// Exact case-insensitive name match.
    Name,
    /// The cell is a substring of a known user's name.
    PartialName,
}

/// Result of looking an owner cell up in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerLookup {
    Found { id: String, via: OwnerMatch },
    /// The cell looks like an email but no user has it. Never creates a user.
    UnknownEmail,
    /// Nothing matched; the caller may create a user for this name.
    Unresolved,
}

/// Mutable email and name index over the known users.
#[derive(Debug, Clone, Default)]
pub struct OwnerDirectory {
    by_email: HashMap<String, String>,
    by_name: HashMap<String, String>,
    users: Vec<User>,
}

impl OwnerDirectory {
    /// Index a directory snapshot. Later users win on duplicate keys.
    pub fn new(users: Vec<User>) -> Self {
        let mut directory = Self::default();
        for user in users {
            directory.register(user);
        }
        directory
    }

    /// Add a user to both indices and to the substring-match list.
    pub fn register(&mut self, user: User) {
        let email = user.email.trim().to_lowercase();
        if !email.is_empty() {
            self.by_email.insert(email, user.id.clone());
        }
        if let Some(name) = user.name.as_deref() {
            let name = name.trim().to_lowercase();
            if !name.is_empty() {
                self.by_name.insert(name, user.id.clone());
            }
        }
        self.users.push(user);
    }

    /// Resolve a trimmed, non-empty owner cell without side effects.
    pub fn lookup(&self, raw: &str) -> OwnerLookup {
        if is_user_id(raw) {
            return OwnerLookup::Found {
                id: raw.to_string(),
                via: OwnerMatch::UserId,
            };
        }

        let needle = raw.to_lowercase();

        if raw.contains('@') {
            return match self.by_email.get(&needle) {
                Some(id) => OwnerLookup::Found {
                    id: id.clone(),
                    via: OwnerMatch::Email,
                },
                None => OwnerLookup::UnknownEmail,
            };
        }

        if let Some(id) = self.by_name.get(&needle) {
            return OwnerLookup::Found {
                id: id.clone(),
                via: OwnerMatch::Name,
            };
        }

        self.users
            .iter()
            .find(|u| {
                u.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .map_or(OwnerLookup::Unresolved, |u| OwnerLookup::Found {
                id: u.id.clone(),
                via: OwnerMatch::PartialName,
            })
    }

    /// Display label for an owner id: name, else email, else the id itself.
    pub fn label(&self, id: &str) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| {
                u.name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .or_else(|| Some(u.email.clone()).filter(|e| !e.is_empty()))
            })
            .unwrap_or_else(|| id.to_string())
    }

    /// Number of users currently indexed.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// True for 24-character hexadecimal ids (either case).
pub fn is_user_id(value: &str) -> bool {
    value.len() == 24 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Email synthesized for an owner created on the fly:
/// lowercased name with whitespace runs replaced by `.`, at `domain`.
pub fn synthesized_email(name: &str, domain: &str) -> String {
    let local = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@{domain}")
}
