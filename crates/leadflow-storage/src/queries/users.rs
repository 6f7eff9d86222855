// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User directory queries.

use chrono::Utc;
use leadflow_core::{LeadflowError, NewUser, User};
use rusqlite::params;

use crate::database::{Database, map_tr_err, new_id};
use crate::queries::to_sql_timestamp;

/// Every user, in creation order.
pub async fn list_users(db: &Database) -> Result<Vec<User>, LeadflowError> {
    db.connection()
        .call(|conn| -> Result<Vec<User>, rusqlite::Error> {
            let mut stmt =
                conn.prepare("SELECT id, email, name FROM users ORDER BY created_at, rowid")?;
            let rows = stmt.query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a user with a fresh id.
///
/// Fails if another user already has the same email, ignoring case.
pub async fn create_user(db: &Database, user: &NewUser) -> Result<User, LeadflowError> {
    let id = new_id();
    let user = user.clone();
    let created_at = to_sql_timestamp(&Utc::now());
    db.connection()
        .call(move |conn| -> Result<User, rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, email, name, status, is_admin, is_account_admin, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    user.email,
                    user.name,
                    user.status.to_string(),
                    user.is_admin,
                    user.is_account_admin,
                    created_at,
                ],
            )?;
            Ok(User {
                id,
                email: user.email,
                name: Some(user.name),
            })
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow_core::UserStatus;

    async fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        (dir, db)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            status: UserStatus::Active,
            is_admin: false,
            is_account_admin: false,
        }
    }

    #[tokio::test]
    async fn created_users_are_listed_in_order() {
        let (_dir, db) = open().await;
        let jane = create_user(&db, &new_user("Jane Smith", "jane.smith@company.com"))
            .await
            .unwrap();
        let kim = create_user(&db, &new_user("Kim Park", "kim.park@company.com"))
            .await
            .unwrap();

        assert_eq!(jane.id.len(), 24);
        assert_ne!(jane.id, kim.id);
        assert_eq!(list_users(&db).await.unwrap(), vec![jane, kim]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_ignoring_case() {
        let (_dir, db) = open().await;
        create_user(&db, &new_user("Jane", "jane@company.com"))
            .await
            .unwrap();
        let err = create_user(&db, &new_user("Other Jane", "JANE@company.com")).await;
        assert!(err.is_err());
        assert_eq!(list_users(&db).await.unwrap().len(), 1);
    }
}
