//! # Sequence Repository
//!
//! Issues the next five-digit number for a code prefix.
//!
//! ## Why Not `SELECT MAX(id) + 1`?
//! ```text
//! Posting A: SELECT MAX(id) → T00041    Posting B: SELECT MAX(id) → T00041
//! Posting A: INSERT T00042              Posting B: INSERT T00042   ❌ clash
//!
//! One upsert instead:
//!
//!   INSERT INTO id_sequences (prefix, last_value)
//!   VALUES ('T', (SELECT MAX(number) FROM transactions) + 1)
//!   ON CONFLICT (prefix) DO UPDATE
//!      SET last_value = MAX(last_value + 1, excluded.last_value)
//!   RETURNING last_value
//!
//! SQLite runs the statement under its write lock, so every caller gets a
//! distinct value, never below the highest existing row.
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use printhub_core::EntityKind;

/// Table holding the rows coded with `kind`'s prefix.
const fn table_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Customer => "customers",
        EntityKind::Staff => "staff",
        EntityKind::Printer => "printers",
        EntityKind::Inventory => "inventory_items",
        EntityKind::Transaction => "transactions",
        EntityKind::Membership => "memberships",
    }
}

/// Repository for store-native id sequences.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    pool: SqlitePool,
}

impl SequenceRepository {
    /// Creates a new SequenceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SequenceRepository { pool }
    }

    /// Atomically issues the next sequence value for `kind`.
    ///
    /// The first value is one past the highest existing code (1 on an
    /// empty table).
    pub async fn next_value(&self, kind: EntityKind) -> DbResult<i64> {
        let sql = format!(
            r#"
            INSERT INTO id_sequences (prefix, last_value)
            VALUES (
                ?1,
                (SELECT COALESCE(MAX(CAST(SUBSTR(id, 2) AS INTEGER)), 0) + 1 FROM {table})
            )
            ON CONFLICT (prefix) DO UPDATE
                SET last_value = MAX(id_sequences.last_value + 1, excluded.last_value)
            RETURNING last_value
            "#,
            table = table_for(kind)
        );

        let value: i64 = sqlx::query_scalar(&sql)
            .bind(kind.prefix().to_string())
            .fetch_one(&self.pool)
            .await?;

        debug!(prefix = %kind.prefix(), value = value, "Issued sequence value");
        Ok(value)
    }

    /// Last value issued for `kind`, if any.
    pub async fn current_value(&self, kind: EntityKind) -> DbResult<Option<i64>> {
        let value: Option<i64> =
            sqlx::query_scalar("SELECT last_value FROM id_sequences WHERE prefix = ?1")
                .bind(kind.prefix().to_string())
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_first_value_on_empty_table() {
        let db = fixtures::database().await;
        let seq = db.sequences();

        assert_eq!(seq.current_value(EntityKind::Transaction).await.unwrap(), None);
        assert_eq!(seq.next_value(EntityKind::Transaction).await.unwrap(), 1);
        assert_eq!(seq.next_value(EntityKind::Transaction).await.unwrap(), 2);
        assert_eq!(seq.current_value(EntityKind::Transaction).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_continues_after_existing_rows() {
        let db = fixtures::database().await;
        for id in ["C00001", "C00007", "C00003"] {
            db.customers().insert(&fixtures::customer(id)).await.unwrap();
        }

        let seq = db.sequences();
        assert_eq!(seq.next_value(EntityKind::Customer).await.unwrap(), 8);

        // A row inserted outside the sequence pushes it forward
        db.customers()
            .insert(&fixtures::customer("C00020"))
            .await
            .unwrap();
        assert_eq!(seq.next_value(EntityKind::Customer).await.unwrap(), 21);
    }

    #[tokio::test]
    async fn test_prefixes_are_independent() {
        let db = fixtures::database().await;
        let seq = db.sequences();

        assert_eq!(seq.next_value(EntityKind::Transaction).await.unwrap(), 1);
        assert_eq!(seq.next_value(EntityKind::Transaction).await.unwrap(), 2);
        assert_eq!(seq.next_value(EntityKind::Membership).await.unwrap(), 1);
    }
}
