//! # Printer Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use printhub_core::Printer;

/// Repository for printer rows.
#[derive(Debug, Clone)]
pub struct PrinterRepository {
    pool: SqlitePool,
}

impl PrinterRepository {
    /// Creates a new PrinterRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PrinterRepository { pool }
    }

    /// Gets a printer by code.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Printer>> {
        let printer = sqlx::query_as::<_, Printer>(
            "SELECT id, name, model, created_at FROM printers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(printer)
    }

    /// Checks whether a printer exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM printers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new printer.
    pub async fn insert(&self, printer: &Printer) -> DbResult<()> {
        debug!(id = %printer.id, "Inserting printer");

        sqlx::query("INSERT INTO printers (id, name, model, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&printer.id)
            .bind(&printer.name)
            .bind(&printer.model)
            .bind(printer.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts printers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM printers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = fixtures::database().await;
        let repo = db.printers();

        repo.insert(&fixtures::printer("P00001")).await.unwrap();

        assert!(repo.exists("P00001").await.unwrap());
        assert!(!repo.exists("P00002").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            repo.get_by_id("P00001").await.unwrap().unwrap().model.as_deref(),
            Some("LaserJet Pro M404")
        );
    }
}
