// src/store/mod.rs
// SQLite persistence for transformation records.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    pub id: String,
    pub user_id: Option<String>,
    pub original_text: String,
    pub humanized_text: String,
    pub mode: String,
    pub formality: i64,
    pub target_audience: String,
    pub verbosity: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when recording a transformation.
#[derive(Debug, Clone)]
pub struct NewTransformation {
    pub user_id: Option<String>,
    pub original_text: String,
    pub humanized_text: String,
    pub mode: String,
    pub formality: i64,
    pub target_audience: String,
    pub verbosity: String,
}

/// Owner scoping for list/delete. `Anonymous` matches records saved
/// without a user id; `Any` skips the filter entirely.
#[derive(Debug, Clone)]
pub enum OwnerFilter {
    Any,
    Anonymous,
    Owner(String),
}

#[derive(Clone)]
pub struct TransformationStore {
    pool: SqlitePool,
}

impl TransformationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the schema if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transformations (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                original_text TEXT NOT NULL,
                humanized_text TEXT NOT NULL,
                mode TEXT NOT NULL,
                formality INTEGER NOT NULL DEFAULT 50,
                target_audience TEXT NOT NULL DEFAULT 'general',
                verbosity TEXT NOT NULL DEFAULT 'balanced',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_transformations_user_time \
             ON transformations(user_id, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn save(&self, new: NewTransformation) -> Result<Transformation> {
        let record = Transformation {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            original_text: new.original_text,
            humanized_text: new.humanized_text,
            mode: new.mode,
            formality: new.formality,
            target_audience: new.target_audience,
            verbosity: new.verbosity,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO transformations \
             (id, user_id, original_text, humanized_text, mode, formality, target_audience, verbosity, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.original_text)
        .bind(&record.humanized_text)
        .bind(&record.mode)
        .bind(record.formality)
        .bind(&record.target_audience)
        .bind(&record.verbosity)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Newest first; `limit` is clamped to [`MAX_LIMIT`].
    pub async fn list(&self, owner: OwnerFilter, limit: i64) -> Result<Vec<Transformation>> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let rows = match owner {
            OwnerFilter::Any => {
                sqlx::query_as::<_, Transformation>(
                    "SELECT * FROM transformations ORDER BY created_at DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            OwnerFilter::Anonymous => {
                sqlx::query_as::<_, Transformation>(
                    "SELECT * FROM transformations WHERE user_id IS NULL \
                     ORDER BY created_at DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            OwnerFilter::Owner(user_id) => {
                sqlx::query_as::<_, Transformation>(
                    "SELECT * FROM transformations WHERE user_id = ? \
                     ORDER BY created_at DESC LIMIT ?",
                )
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Transformation>> {
        let row = sqlx::query_as::<_, Transformation>("SELECT * FROM transformations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns true if a matching record was deleted.
    pub async fn delete(&self, id: &str, owner: OwnerFilter) -> Result<bool> {
        let result = match owner {
            OwnerFilter::Any => {
                sqlx::query("DELETE FROM transformations WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            OwnerFilter::Anonymous => {
                sqlx::query("DELETE FROM transformations WHERE id = ? AND user_id IS NULL")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            OwnerFilter::Owner(user_id) => {
                sqlx::query("DELETE FROM transformations WHERE id = ? AND user_id = ?")
                    .bind(id)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }
}
