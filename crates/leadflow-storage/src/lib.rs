// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Leadflow.
//!
//! WAL-mode SQLite with embedded migrations behind a single
//! `tokio-rusqlite` connection. [`SqliteStorage`] implements both the
//! user directory and the lead store.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
