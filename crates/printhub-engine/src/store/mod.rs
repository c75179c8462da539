//! # Store Port
//!
//! Everything the engine needs from persistence, one method per atomic
//! statement. The engine never opens a store-level transaction: each call
//! commits on its own and the compensation log covers the gaps between them.
//!
//! ```text
//! PostingEngine ──► dyn PostingStore
//!                        │
//!                        ├── Database          (sqlite.rs)
//!                        └── fault-injecting wrapper (tests)
//! ```

mod sqlite;

use async_trait::async_trait;
use chrono::NaiveDate;

use printhub_core::{
    EntityKind, InventoryItem, Membership, PrinterAssignment, StaffAssignment, Transaction,
    TransactionInventoryLine,
};
use printhub_db::DbResult;

/// Persistence operations used by posting and reversal.
#[async_trait]
pub trait PostingStore: Send + Sync {
    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    async fn customer_exists(&self, id: &str) -> DbResult<bool>;

    async fn staff_exists(&self, id: &str) -> DbResult<bool>;

    async fn printer_exists(&self, id: &str) -> DbResult<bool>;

    async fn transaction_exists(&self, id: &str) -> DbResult<bool>;

    async fn get_item(&self, id: &str) -> DbResult<Option<InventoryItem>>;

    /// The customer's membership if `expiry_date >= today`.
    async fn find_active_membership(
        &self,
        customer_id: &str,
        today: NaiveDate,
    ) -> DbResult<Option<Membership>>;

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Issues the next sequence value for `kind`; no two callers get the
    /// same value.
    async fn next_sequence_value(&self, kind: EntityKind) -> DbResult<i64>;

    /// Adds `delta` to a membership's points, refusing to go below zero.
    async fn apply_points_delta(&self, membership_id: &str, delta: i64) -> DbResult<()>;

    async fn insert_transaction(&self, transaction: &Transaction) -> DbResult<()>;

    async fn delete_transaction(&self, id: &str) -> DbResult<()>;

    async fn insert_staff_link(&self, link: &StaffAssignment) -> DbResult<()>;

    async fn delete_staff_links(&self, transaction_id: &str) -> DbResult<u64>;

    async fn insert_printer_link(&self, link: &PrinterAssignment) -> DbResult<()>;

    async fn delete_printer_links(&self, transaction_id: &str) -> DbResult<u64>;

    async fn insert_inventory_lines(&self, lines: &[TransactionInventoryLine]) -> DbResult<()>;

    /// Deletes and returns a transaction's inventory lines. A second call
    /// returns nothing.
    async fn take_inventory_lines(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<TransactionInventoryLine>>;

    /// Decrements stock only if at least `quantity` is on hand.
    ///
    /// `Ok(false)` when nothing matched (short stock or missing item).
    async fn try_decrement_stock(&self, item_id: &str, quantity: i64) -> DbResult<bool>;

    /// `Err(NotFound)` when the item no longer exists.
    async fn increment_stock(&self, item_id: &str, quantity: i64) -> DbResult<()>;
}
