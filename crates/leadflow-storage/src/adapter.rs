// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the user directory and lead store.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use leadflow_config::model::StorageConfig;
use leadflow_core::{
    AdapterType, HealthStatus, Lead, LeadDraft, LeadStore, LeadflowError, NewUser,
    PluginAdapter, User, UserDirectory,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed user directory and lead store.
///
/// The database is opened lazily by [`SqliteStorage::initialize`]; every
/// other operation fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a storage handle. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), LeadflowError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| LeadflowError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, LeadflowError> {
        self.db.get().ok_or_else(|| LeadflowError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LeadStore
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadflowError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("database not opened".to_string()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadflowError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for SqliteStorage {
    async fn list_users(&self) -> Result<Vec<User>, LeadflowError> {
        queries::users::list_users(self.db()?).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, LeadflowError> {
        queries::users::create_user(self.db()?, user)
            .await
            .map_err(|e| LeadflowError::Directory {
                message: format!("failed to create user {:?} <{}>", user.name, user.email),
                source: Some(Box::new(e)),
            })
    }
}

#[async_trait]
impl LeadStore for SqliteStorage {
    async fn find_existing_emails(
        &self,
        emails: &[String],
    ) -> Result<HashSet<String>, LeadflowError> {
        queries::leads::find_existing_emails(self.db()?, emails).await
    }

    async fn insert_many(&self, leads: &[LeadDraft]) -> Result<usize, LeadflowError> {
        let inserted = queries::leads::insert_many(self.db()?, leads).await?;
        debug!(inserted, "leads inserted");
        Ok(inserted)
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, LeadflowError> {
        queries::leads::list_leads(self.db()?).await
    }

    async fn delete_all_leads(&self) -> Result<usize, LeadflowError> {
        let deleted = queries::leads::delete_all_leads(self.db()?).await?;
        debug!(deleted, "leads deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("adapter.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(config(&dir));

        assert!(storage.list_users().await.is_err());
        assert!(matches!(
            storage.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn double_initialize_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(config(&dir));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_user_email_is_a_directory_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(config(&dir));
        storage.initialize().await.unwrap();

        let user = NewUser {
            name: "Jane Smith".into(),
            email: "jane.smith@company.com".into(),
            status: leadflow_core::UserStatus::Active,
            is_admin: false,
            is_account_admin: false,
        };
        storage.create_user(&user).await.unwrap();
        let err = storage.create_user(&user).await.unwrap_err();
        assert!(matches!(err, LeadflowError::Directory { .. }));
    }
}
