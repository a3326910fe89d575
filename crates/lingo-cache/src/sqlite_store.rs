//! SQLite implementation of ILocalStore
//!
//! Each partition maps to its own table. Records are stored as their JSON
//! body keyed by the partition's identifier field.
//!
//! ## Type Mapping
//!
//! | Domain Type   | SQL Type | Strategy                                      |
//! |---------------|----------|-----------------------------------------------|
//! | RecordId      | TEXT     | `.as_str()` / `RecordId::new()`               |
//! | Record        | TEXT     | serde_json object                             |
//! | DateTime<Utc> | TEXT     | ISO 8601 via `to_rfc3339()`                   |

use chrono::Utc;
use sqlx::Row;

use lingo_core::domain::{Partition, QuotaEstimate, Record, RecordId};
use lingo_core::ports::ILocalStore;

use crate::{CacheError, DatabasePool};

/// SQLite-based implementation of the local store port
///
/// Capacity is reported against a fixed byte quota chosen at construction;
/// a quota of 0 means "unknown" and capacity degrades to zeros.
pub struct SqliteLocalStore {
    pool: DatabasePool,
    quota_bytes: u64,
}

impl SqliteLocalStore {
    /// Creates a store over an open pool
    pub fn new(pool: DatabasePool, quota_bytes: u64) -> Self {
        Self { pool, quota_bytes }
    }
}

// ============================================================================
// Helper functions for type conversion
// ============================================================================

/// Table backing a partition
///
/// Table names are fixed strings, never user input, so they can be
/// interpolated into SQL.
fn table(partition: Partition) -> &'static str {
    match partition {
        Partition::Lessons => "lessons",
        Partition::Vocabulary => "vocabulary",
        Partition::Activities => "activities",
        Partition::Progress => "progress",
        Partition::UserSettings => "user_settings",
    }
}

fn record_from_body(partition: Partition, body: &str) -> Result<Record, CacheError> {
    serde_json::from_str(body).map_err(|e| {
        CacheError::SerializationError(format!("Invalid record body in '{partition}': {e}"))
    })
}

fn record_to_body(record: &Record) -> Result<String, CacheError> {
    serde_json::to_string(record)
        .map_err(|e| CacheError::SerializationError(format!("Failed to serialize record: {e}")))
}

// ============================================================================
// ILocalStore implementation
// ============================================================================

#[async_trait::async_trait]
impl ILocalStore for SqliteLocalStore {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.pool.migrate().await?;
        Ok(())
    }

    async fn put(&self, partition: Partition, records: &[Record]) -> anyhow::Result<()> {
        // Validate the whole batch before touching the database.
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let id = record.identifier(partition).map_err(CacheError::from)?;
            rows.push((id, record_to_body(record)?));
        }

        let sql = format!(
            "INSERT INTO {} (record_id, body, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(record_id) DO UPDATE SET \
             body = excluded.body, updated_at = excluded.updated_at",
            table(partition)
        );
        let updated_at = Utc::now().to_rfc3339();

        let mut tx = self.pool.pool().begin().await?;
        for (id, body) in &rows {
            sqlx::query(&sql)
                .bind(id.as_str())
                .bind(body)
                .bind(&updated_at)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::trace!(%partition, count = rows.len(), "Upserted records");
        Ok(())
    }

    async fn get(&self, partition: Partition, id: &RecordId) -> anyhow::Result<Option<Record>> {
        let sql = format!("SELECT body FROM {} WHERE record_id = ?", table(partition));
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.pool())
            .await?;

        match row {
            Some(ref r) => {
                let body: String = r.get("body");
                Ok(Some(record_from_body(partition, &body)?))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self, partition: Partition) -> anyhow::Result<Vec<Record>> {
        let sql = format!(
            "SELECT body FROM {} ORDER BY updated_at ASC, record_id ASC",
            table(partition)
        );
        let rows = sqlx::query(&sql).fetch_all(self.pool.pool()).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let body: String = row.get("body");
            records.push(record_from_body(partition, &body)?);
        }

        Ok(records)
    }

    async fn remove(&self, partition: Partition, ids: &[RecordId]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let sql = format!("DELETE FROM {} WHERE record_id = ?", table(partition));

        let mut tx = self.pool.pool().begin().await?;
        let mut removed = 0;
        for id in ids {
            removed += sqlx::query(&sql)
                .bind(id.as_str())
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;

        tracing::debug!(%partition, removed, "Removed records");
        Ok(())
    }

    async fn clear(&self, partition: Partition) -> anyhow::Result<()> {
        let sql = format!("DELETE FROM {}", table(partition));
        let result = sqlx::query(&sql).execute(self.pool.pool()).await?;

        tracing::debug!(%partition, removed = result.rows_affected(), "Cleared partition");
        Ok(())
    }

    async fn count(&self, partition: Partition) -> anyhow::Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table(partition));
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.pool.pool()).await?;
        Ok(count.max(0) as u64)
    }

    async fn quota_estimate(&self) -> anyhow::Result<Option<QuotaEstimate>> {
        if self.quota_bytes == 0 {
            return Ok(None);
        }
        let used = self.pool.size_bytes().await?;
        Ok(Some(QuotaEstimate {
            used,
            quota: self.quota_bytes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_partition_has_a_table() {
        let mut tables: Vec<&str> = Partition::ALL.iter().map(|p| table(*p)).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Partition::ALL.len());
    }

    #[tokio::test]
    async fn test_corrupt_body_is_serialization_error() {
        let pool = DatabasePool::in_memory().await.unwrap();
        sqlx::query("INSERT INTO lessons (record_id, body, updated_at) VALUES ('x', 'not json', '')")
            .execute(pool.pool())
            .await
            .unwrap();
        let store = SqliteLocalStore::new(pool, 0);

        let err = store.get_all(Partition::Lessons).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CacheError>(),
            Some(CacheError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_record_rejects_whole_batch() {
        let pool = DatabasePool::in_memory().await.unwrap();
        let store = SqliteLocalStore::new(pool, 0);
        let good = Record::from_value(serde_json::json!({"id": "l1"})).unwrap();
        let bad = Record::from_value(serde_json::json!({"title": "no id"})).unwrap();

        assert!(store.put(Partition::Lessons, &[good, bad]).await.is_err());
        assert_eq!(store.count(Partition::Lessons).await.unwrap(), 0);
    }
}
