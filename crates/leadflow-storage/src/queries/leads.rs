// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead queries.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::Utc;
use leadflow_core::{Lead, LeadDraft, LeadStatus, LeadflowError};
use rusqlite::types::Type;
use rusqlite::{Row, params, params_from_iter};

use crate::database::{Database, map_tr_err, new_id};
use crate::queries::{from_sql_timestamp, to_sql_timestamp};

/// Bound parameters per `IN (...)` lookup, well under SQLite's variable limit.
const EMAIL_CHUNK: usize = 500;

const LEAD_COLUMNS: &str = "id, v, created_by, updated_by, first_name, last_name, email, phone,
     lead_source, status, lead_type, website_url, twitter_username, linkedin_url,
     whatsapp_phone, start_date, assigned_to, created_at";

/// The subset of `emails` already stored, lowercased.
pub async fn find_existing_emails(
    db: &Database,
    emails: &[String],
) -> Result<HashSet<String>, LeadflowError> {
    let wanted: Vec<String> = emails
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if wanted.is_empty() {
        return Ok(HashSet::new());
    }

    db.connection()
        .call(move |conn| -> Result<HashSet<String>, rusqlite::Error> {
            let mut found = HashSet::new();
            for chunk in wanted.chunks(EMAIL_CHUNK) {
                let placeholders = vec!["?"; chunk.len()].join(", ");
                let sql = format!(
                    "SELECT DISTINCT lower(email) FROM leads WHERE lower(email) IN ({placeholders})"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| row.get(0))?;
                for row in rows {
                    found.insert(row?);
                }
            }
            Ok(found)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert every draft in one transaction. Either all rows land or none do.
pub async fn insert_many(db: &Database, leads: &[LeadDraft]) -> Result<usize, LeadflowError> {
    let leads = leads.to_vec();
    let now = to_sql_timestamp(&Utc::now());
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO leads (id, v, created_by, updated_by, first_name, last_name,
                        email, phone, lead_source, status, lead_type, website_url,
                        twitter_username, linkedin_url, whatsapp_phone, start_date,
                        assigned_to, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                        ?15, ?16, ?17, ?18, ?18)",
                )?;
                for lead in &leads {
                    stmt.execute(params![
                        new_id(),
                        lead.version,
                        lead.created_by,
                        lead.updated_by,
                        lead.first_name,
                        lead.last_name,
                        lead.email,
                        lead.phone,
                        lead.lead_source,
                        lead.status.map(|s| s.to_string()),
                        lead.lead_type,
                        lead.website_url,
                        lead.twitter_username,
                        lead.linkedin_url,
                        lead.whatsapp_phone,
                        lead.start_date.as_ref().map(to_sql_timestamp),
                        lead.assigned_to,
                        now,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(leads.len())
        })
        .await
        .map_err(map_tr_err)
}

/// Every stored lead, oldest first.
pub async fn list_leads(db: &Database) -> Result<Vec<Lead>, LeadflowError> {
    db.connection()
        .call(|conn| -> Result<Vec<Lead>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at, rowid"
            ))?;
            let rows = stmt.query_map([], lead_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Delete every lead and return how many were removed.
pub async fn delete_all_leads(db: &Database) -> Result<usize, LeadflowError> {
    db.connection()
        .call(|conn| -> Result<usize, rusqlite::Error> { conn.execute("DELETE FROM leads", []) })
        .await
        .map_err(map_tr_err)
}

fn lead_from_row(row: &Row<'_>) -> Result<Lead, rusqlite::Error> {
    let status: Option<String> = row.get(9)?;
    let status = status
        .map(|s| {
            LeadStatus::from_str(&s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })
        })
        .transpose()?;
    let start_date: Option<String> = row.get(15)?;
    let start_date = start_date
        .map(|s| from_sql_timestamp(15, &s))
        .transpose()?;
    let created_at: String = row.get(17)?;

    Ok(Lead {
        id: row.get(0)?,
        created_at: from_sql_timestamp(17, &created_at)?,
        draft: LeadDraft {
            version: row.get(1)?,
            created_by: row.get(2)?,
            updated_by: row.get(3)?,
            first_name: row.get(4)?,
            last_name: row.get(5)?,
            email: row.get(6)?,
            phone: row.get(7)?,
            lead_source: row.get(8)?,
            status,
            lead_type: row.get(10)?,
            website_url: row.get(11)?,
            twitter_username: row.get(12)?,
            linkedin_url: row.get(13)?,
            whatsapp_phone: row.get(14)?,
            start_date,
            assigned_to: row.get(16)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        (dir, db)
    }

    fn draft(email: &str) -> LeadDraft {
        let mut draft = LeadDraft::new(Some("aaaaaaaaaaaaaaaaaaaaaaaa"), "DEMO");
        draft.first_name = "John".into();
        draft.email = email.into();
        draft
    }

    #[tokio::test]
    async fn inserted_leads_read_back_intact() {
        let (_dir, db) = open().await;
        let mut lead = draft("john@x.com");
        lead.status = Some(LeadStatus::HandedToAe);
        lead.phone = Some("555-1111".into());
        lead.start_date = Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());
        lead.assigned_to = Some("65f0a1b2c3d4e5f601234567".into());

        assert_eq!(insert_many(&db, &[lead.clone(), draft("")]).await.unwrap(), 2);

        let stored = list_leads(&db).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].draft, lead);
        assert_eq!(stored[0].id.len(), 24);
        assert_eq!(stored[1].draft.email, "");
        assert_eq!(stored[1].draft.status, None);
    }

    #[tokio::test]
    async fn existing_emails_match_ignoring_case() {
        let (_dir, db) = open().await;
        insert_many(&db, &[draft("John@X.com"), draft("")])
            .await
            .unwrap();

        let found = find_existing_emails(
            &db,
            &["JOHN@x.com".into(), "jane@x.com".into(), "".into()],
        )
        .await
        .unwrap();
        assert_eq!(found, HashSet::from(["john@x.com".to_string()]));
    }

    #[tokio::test]
    async fn lookup_handles_more_emails_than_one_chunk() {
        let (_dir, db) = open().await;
        insert_many(&db, &[draft("last@x.com")]).await.unwrap();

        let mut emails: Vec<String> = (0..EMAIL_CHUNK * 2)
            .map(|i| format!("user{i}@x.com"))
            .collect();
        emails.push("last@x.com".into());

        let found = find_existing_emails(&db, &emails).await.unwrap();
        assert!(found.contains("last@x.com"));
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn failed_batch_inserts_nothing() {
        let (_dir, db) = open().await;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(
                    "CREATE TRIGGER reject_bad BEFORE INSERT ON leads
                     WHEN NEW.email = 'bad@x.com'
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )
            })
            .await
            .unwrap();

        let result = insert_many(&db, &[draft("ok@x.com"), draft("bad@x.com")]).await;
        assert!(matches!(result, Err(LeadflowError::Storage { .. })));
        assert!(list_leads(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_all_returns_count() {
        let (_dir, db) = open().await;
        insert_many(&db, &[draft("a@x.com"), draft("b@x.com")])
            .await
            .unwrap();
        assert_eq!(delete_all_leads(&db).await.unwrap(), 2);
        assert_eq!(delete_all_leads(&db).await.unwrap(), 0);
    }
}
