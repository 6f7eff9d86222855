// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead import normalizer for HubSpot-style CSV exports.
//!
//! An import run splits the uploaded text into rows, maps known headers to
//! lead fields, folds free-text stages into canonical pipeline stages,
//! resolves contact owners against the user directory (creating users for
//! unknown owner names), drops leads whose email is already stored, and
//! bulk-inserts the rest through the lead store.
//!
//! The crate also carries the two read-side views of the same data: CSV
//! export and the pipeline summary.

pub mod dedup;
pub mod export;
pub mod fields;
pub mod importer;
pub mod normalizer;
pub mod owner;
pub mod rows;
pub mod status;
pub mod summary;

pub use importer::LeadImporter;
pub use normalizer::{ImportSettings, NormalizedBatch, Normalizer};
pub use owner::OwnerDirectory;
pub use summary::{PipelineSummary, summarize};
