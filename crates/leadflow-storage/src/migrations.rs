// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations, applied on every open.

use leadflow_core::LeadflowError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply pending migrations. Applied versions live in `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), LeadflowError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(LeadflowError::storage)?;
    tracing::debug!(
        applied = report.applied_migrations().len(),
        "schema migrations checked"
    );
    Ok(())
}
