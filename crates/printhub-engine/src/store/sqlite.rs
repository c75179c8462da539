//! `PostingStore` over the SQLite repositories.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::PostingStore;
use printhub_core::{
    EntityKind, InventoryItem, Membership, PrinterAssignment, StaffAssignment, Transaction,
    TransactionInventoryLine,
};
use printhub_db::{Database, DbResult};

#[async_trait]
impl PostingStore for Database {
    async fn customer_exists(&self, id: &str) -> DbResult<bool> {
        self.customers().exists(id).await
    }

    async fn staff_exists(&self, id: &str) -> DbResult<bool> {
        self.staff().exists(id).await
    }

    async fn printer_exists(&self, id: &str) -> DbResult<bool> {
        self.printers().exists(id).await
    }

    async fn transaction_exists(&self, id: &str) -> DbResult<bool> {
        self.transactions().exists(id).await
    }

    async fn get_item(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        self.inventory().get_by_id(id).await
    }

    async fn find_active_membership(
        &self,
        customer_id: &str,
        today: NaiveDate,
    ) -> DbResult<Option<Membership>> {
        self.memberships().find_active(customer_id, today).await
    }

    async fn next_sequence_value(&self, kind: EntityKind) -> DbResult<i64> {
        self.sequences().next_value(kind).await
    }

    async fn apply_points_delta(&self, membership_id: &str, delta: i64) -> DbResult<()> {
        self.memberships()
            .apply_points_delta(membership_id, delta)
            .await
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> DbResult<()> {
        self.transactions().insert(transaction).await
    }

    async fn delete_transaction(&self, id: &str) -> DbResult<()> {
        self.transactions().delete(id).await
    }

    async fn insert_staff_link(&self, link: &StaffAssignment) -> DbResult<()> {
        self.transactions().insert_staff_link(link).await
    }

    async fn delete_staff_links(&self, transaction_id: &str) -> DbResult<u64> {
        self.transactions().delete_staff_links(transaction_id).await
    }

    async fn insert_printer_link(&self, link: &PrinterAssignment) -> DbResult<()> {
        self.transactions().insert_printer_link(link).await
    }

    async fn delete_printer_links(&self, transaction_id: &str) -> DbResult<u64> {
        self.transactions().delete_printer_links(transaction_id).await
    }

    async fn insert_inventory_lines(&self, lines: &[TransactionInventoryLine]) -> DbResult<()> {
        self.transactions().insert_inventory_lines(lines).await
    }

    async fn take_inventory_lines(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<TransactionInventoryLine>> {
        self.transactions().take_inventory_lines(transaction_id).await
    }

    async fn try_decrement_stock(&self, item_id: &str, quantity: i64) -> DbResult<bool> {
        self.inventory().try_decrement_stock(item_id, quantity).await
    }

    async fn increment_stock(&self, item_id: &str, quantity: i64) -> DbResult<()> {
        self.inventory().increment_stock(item_id, quantity).await
    }
}
