//! Settings table operations

use crate::utils::Result;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use tracing::debug;

/// Database manager
#[derive(Clone)]
pub struct DatabaseManager {
    pool: Pool<Sqlite>,
}

/// One stored setting, value as raw JSON text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub key: String,
    pub value: String,
}

impl DatabaseManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert or overwrite a setting
    pub async fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        debug!("Saved setting: {} = {}", key, value);
        Ok(())
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    pub async fn get_all_settings(&self) -> Result<Vec<SettingsRecord>> {
        let rows = sqlx::query("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;

        let settings = rows
            .into_iter()
            .map(|row| SettingsRecord {
                key: row.get("key"),
                value: row.get("value"),
            })
            .collect();

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_overwrite_setting() {
        let dir = tempdir().unwrap();
        let pool = initialize_database(&dir.path().join("prefs.db")).await.unwrap();
        let db = DatabaseManager::new(pool);

        assert_eq!(db.get_setting("onboarding-done").await.unwrap(), None);

        db.save_setting("onboarding-done", "false").await.unwrap();
        db.save_setting("onboarding-done", "true").await.unwrap();

        assert_eq!(
            db.get_setting("onboarding-done").await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(db.get_all_settings().await.unwrap().len(), 1);
    }
}
