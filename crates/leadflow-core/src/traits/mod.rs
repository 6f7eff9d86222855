// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Both collaborators extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod directory;
pub mod store;

pub use adapter::PluginAdapter;
pub use directory::UserDirectory;
pub use store::LeadStore;
