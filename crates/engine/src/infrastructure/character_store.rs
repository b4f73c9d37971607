//! SQLite-backed character sheet storage.
//!
//! One row per `(user_id, name_key)`; the sheet itself is a JSON document.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use sheetkeeper_domain::{CharacterSheet, UserId};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

/// SQLite implementation of [`CharacterRepo`].
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("character.connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                user_id TEXT NOT NULL,
                name_key TEXT NOT NULL,
                name TEXT NOT NULL,
                sheet_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, name_key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("character.schema", e))?;

        Ok(Self { pool, clock })
    }

    fn decode(json: &str) -> Result<CharacterSheet, RepoError> {
        serde_json::from_str(json).map_err(RepoError::serialization)
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, user_id: &UserId, name: &str) -> Result<Option<CharacterSheet>, RepoError> {
        let row = sqlx::query(
            "SELECT sheet_json FROM characters WHERE user_id = ? AND name_key = ?",
        )
        .bind(user_id.as_str())
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("character.get", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("sheet_json");
                Ok(Some(Self::decode(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CharacterSheet>, RepoError> {
        let rows = sqlx::query(
            "SELECT sheet_json FROM characters WHERE user_id = ? ORDER BY name_key",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("character.list", e))?;

        rows.iter()
            .map(|row| Self::decode(&row.get::<String, _>("sheet_json")))
            .collect()
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<usize, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM characters WHERE user_id = ?")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("character.count", e))?;

        usize::try_from(count).map_err(|e| RepoError::database("character.count", e))
    }

    async fn save(&self, sheet: &CharacterSheet) -> Result<(), RepoError> {
        let json = serde_json::to_string(sheet).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO characters (user_id, name_key, name, sheet_json, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, name_key) DO UPDATE SET
                name = excluded.name,
                sheet_json = excluded.sheet_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(sheet.user_id().as_str())
        .bind(sheet.name().key())
        .bind(sheet.name().as_str())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("character.save", e))?;

        tracing::debug!(
            user_id = %sheet.user_id(),
            character = %sheet.name(),
            "Saved character sheet"
        );
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, name: &str) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE user_id = ? AND name_key = ?")
            .bind(user_id.as_str())
            .bind(name_key(name))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("character.delete", e))?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(user_id = %user_id, character = %name, deleted, "Deleted character sheet");
        Ok(deleted)
    }
}
