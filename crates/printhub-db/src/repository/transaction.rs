//! # Transaction Repository
//!
//! Database operations for transactions and the rows they own.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transactions (T00042)                                                  │
//! │  ├── transaction_inventory   (T00042, I00001, 2) (T00042, I00003, 1)    │
//! │  ├── transaction_staff       (T00042, S00001)                           │
//! │  └── transaction_printers    (T00042, P00002)   -- optional             │
//! │                                                                         │
//! │  Foreign keys have no ON DELETE CASCADE: the engine removes the         │
//! │  association rows explicitly, then the transaction row.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Claiming Lines
//! [`TransactionRepository::take_inventory_lines`] deletes and returns the
//! lines in one `DELETE … RETURNING` statement, so two reversals of the same
//! transaction can never both see (and restore) the same line.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use printhub_core::{PrinterAssignment, StaffAssignment, Transaction, TransactionInventoryLine};

/// One page of rows plus the total row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    /// True when rows exist past this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

/// Repository for transaction operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Transaction Rows
    // =========================================================================

    /// Gets a transaction by code.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, created_at, total_price_cents, payment_method, customer_id, paper_count
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Inserts a transaction row.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - code already used
    /// * `Err(DbError::ForeignKeyViolation)` - customer doesn't exist
    pub async fn insert(&self, transaction: &Transaction) -> DbResult<()> {
        debug!(
            id = %transaction.id,
            total_cents = transaction.total_price_cents,
            "Inserting transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, created_at, total_price_cents, payment_method, customer_id, paper_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&transaction.id)
        .bind(transaction.created_at)
        .bind(transaction.total_price_cents)
        .bind(transaction.payment_method)
        .bind(&transaction.customer_id)
        .bind(transaction.paper_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a transaction row. Association rows must be gone first.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such transaction
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    /// Checks whether a transaction exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM transactions WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Lists transactions newest first (highest code first).
    pub async fn list_page(&self, limit: i64, offset: i64) -> DbResult<Page<Transaction>> {
        let items = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, created_at, total_price_cents, payment_method, customer_id, paper_count
            FROM transactions
            ORDER BY id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;

        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    /// Counts transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Inventory Lines
    // =========================================================================

    /// Inserts all inventory lines in one statement.
    pub async fn insert_inventory_lines(&self, lines: &[TransactionInventoryLine]) -> DbResult<()> {
        if lines.is_empty() {
            return Ok(());
        }

        debug!(
            transaction_id = %lines[0].transaction_id,
            count = lines.len(),
            "Inserting inventory lines"
        );

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO transaction_inventory (transaction_id, inventory_id, quantity) ",
        );
        builder.push_values(lines, |mut row, line| {
            row.push_bind(&line.transaction_id)
                .push_bind(&line.inventory_id)
                .push_bind(line.quantity);
        });

        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    /// Reads a transaction's inventory lines.
    pub async fn get_inventory_lines(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<TransactionInventoryLine>> {
        let lines = sqlx::query_as::<_, TransactionInventoryLine>(
            r#"
            SELECT transaction_id, inventory_id, quantity
            FROM transaction_inventory
            WHERE transaction_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Deletes a transaction's inventory lines and returns what was deleted.
    pub async fn take_inventory_lines(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<TransactionInventoryLine>> {
        debug!(transaction_id = %transaction_id, "Claiming inventory lines");

        let lines = sqlx::query_as::<_, TransactionInventoryLine>(
            r#"
            DELETE FROM transaction_inventory
            WHERE transaction_id = ?1
            RETURNING transaction_id, inventory_id, quantity
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    // =========================================================================
    // Staff / Printer Links
    // =========================================================================

    /// Links the handling staff member.
    pub async fn insert_staff_link(&self, link: &StaffAssignment) -> DbResult<()> {
        debug!(transaction_id = %link.transaction_id, staff_id = %link.staff_id, "Linking staff");

        sqlx::query("INSERT INTO transaction_staff (transaction_id, staff_id) VALUES (?1, ?2)")
            .bind(&link.transaction_id)
            .bind(&link.staff_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Links the printer used for the print service.
    pub async fn insert_printer_link(&self, link: &PrinterAssignment) -> DbResult<()> {
        debug!(
            transaction_id = %link.transaction_id,
            printer_id = %link.printer_id,
            "Linking printer"
        );

        sqlx::query(
            "INSERT INTO transaction_printers (transaction_id, printer_id) VALUES (?1, ?2)",
        )
        .bind(&link.transaction_id)
        .bind(&link.printer_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads a transaction's staff links.
    pub async fn get_staff_links(&self, transaction_id: &str) -> DbResult<Vec<StaffAssignment>> {
        let links = sqlx::query_as::<_, StaffAssignment>(
            "SELECT transaction_id, staff_id FROM transaction_staff WHERE transaction_id = ?1",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Reads a transaction's printer links.
    pub async fn get_printer_links(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<PrinterAssignment>> {
        let links = sqlx::query_as::<_, PrinterAssignment>(
            "SELECT transaction_id, printer_id FROM transaction_printers WHERE transaction_id = ?1",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Deletes a transaction's staff links. Returns the number removed.
    pub async fn delete_staff_links(&self, transaction_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM transaction_staff WHERE transaction_id = ?1")
            .bind(transaction_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a transaction's printer links. Returns the number removed.
    pub async fn delete_printer_links(&self, transaction_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM transaction_printers WHERE transaction_id = ?1")
            .bind(transaction_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
