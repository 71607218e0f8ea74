use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::Result;

/// Storage key that no metadata record references any more
#[derive(Debug, Clone, FromRow)]
pub struct OrphanedObject {
    pub id: Uuid,
    pub object_key: String,
    pub reason: String,
    pub attempts: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Ledger of objects left behind by partially failed storage operations.
///
/// Entries are consumed by `ObjectRelocator::sweep_orphans`. A key that gets
/// written again is released, so the sweep never deletes a live object.
#[async_trait]
pub trait OrphanLedger: Send + Sync {
    /// Record a key for later deletion; recording the same key twice is a no-op
    async fn record(&self, object_key: &str, reason: &str) -> Result<()>;

    /// Entries never attempted come first, then the least recently attempted
    async fn pending(&self, limit: i64) -> Result<Vec<OrphanedObject>>;

    /// Remove an entry once its object is gone
    async fn resolve(&self, id: Uuid) -> Result<()>;

    /// Note a failed sweep attempt, moving the entry behind the others
    async fn mark_failed(&self, id: Uuid) -> Result<()>;

    /// Drop any entry for a key that is live again. Returns whether one existed.
    async fn release(&self, object_key: &str) -> Result<bool>;
}

/// Postgres-backed orphan ledger (`orphaned_objects` table)
pub struct PgOrphanLedger {
    pool: PgPool,
}

impl PgOrphanLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrphanLedger for PgOrphanLedger {
    async fn record(&self, object_key: &str, reason: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orphaned_objects (object_key, reason)
            VALUES ($1, $2)
            ON CONFLICT (object_key) DO NOTHING
            "#,
        )
        .bind(object_key)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn pending(&self, limit: i64) -> Result<Vec<OrphanedObject>> {
        let rows = sqlx::query_as::<_, OrphanedObject>(
            r#"
            SELECT id, object_key, reason, attempts, last_attempt_at, created_at
            FROM orphaned_objects
            ORDER BY last_attempt_at NULLS FIRST, created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn resolve(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM orphaned_objects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orphaned_objects
            SET attempts = attempts + 1, last_attempt_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn release(&self, object_key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orphaned_objects WHERE object_key = $1")
            .bind(object_key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
