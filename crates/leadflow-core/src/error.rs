// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Leadflow.

use thiserror::Error;

/// The primary error type used across collaborator traits and the import pipeline.
#[derive(Debug, Error)]
pub enum LeadflowError {
    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// User directory errors (lookup or user creation failure).
    #[error("user directory error: {message}")]
    Directory {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The import was invoked without any file content.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// The input was present but unusable (too large, not UTF-8).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeadflowError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LeadflowError::Storage {
            source: Box::new(err),
        }
    }
}
