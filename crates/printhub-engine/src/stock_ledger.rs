//! # Stock Ledger
//!
//! The only writer of `inventory_items.stock`.
//!
//! ```text
//!   reserve(item, q)           read-only; fails fast before any write
//!   commit_decrement(item, q)  UPDATE … WHERE stock >= q   (compare-and-set)
//!   restore(item, q)           stock += q; a missing item is skipped
//! ```
//!
//! A reservation is only a check. Another posting can take the stock between
//! `reserve` and `commit_decrement`; the conditional decrement catches that
//! and reports `InsufficientStock` with the freshly read level.

use tracing::{debug, warn};

use crate::error::{PostingError, PostingResult};
use crate::store::PostingStore;
use printhub_core::pricing::Reservation;
use printhub_db::DbError;

/// What `restore` did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    /// The item no longer exists.
    Skipped,
}

/// Stock operations over a store.
pub struct StockLedger<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> StockLedger<'a, S>
where
    S: PostingStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        StockLedger { store }
    }

    /// Checks that `quantity` units of `item_id` are on hand and snapshots
    /// the item's name and price.
    pub async fn reserve(&self, item_id: &str, quantity: i64) -> PostingResult<Reservation> {
        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| PostingError::not_found("Inventory item", item_id))?;

        let reservation = item.reserve(quantity)?;
        debug!(item_id = %item_id, quantity = quantity, stock = item.stock, "Reserved");
        Ok(reservation)
    }

    /// Takes `quantity` units, failing if they are no longer there.
    pub async fn commit_decrement(&self, item_id: &str, quantity: i64) -> PostingResult<()> {
        if self.store.try_decrement_stock(item_id, quantity).await? {
            return Ok(());
        }

        // Nothing matched: find out whether the item is gone or just short.
        match self.store.get_item(item_id).await? {
            None => Err(PostingError::not_found("Inventory item", item_id)),
            Some(item) => {
                warn!(
                    item_id = %item_id,
                    requested = quantity,
                    available = item.stock,
                    "Stock changed after reservation"
                );
                Err(PostingError::InsufficientStock {
                    item_name: item.name,
                    available: item.stock,
                    requested: quantity,
                })
            }
        }
    }

    /// Puts `quantity` units back.
    ///
    /// A missing item is logged and skipped so that a deleted item never
    /// blocks deleting the transactions that reference it.
    pub async fn restore(&self, item_id: &str, quantity: i64) -> PostingResult<RestoreOutcome> {
        match self.store.increment_stock(item_id, quantity).await {
            Ok(()) => Ok(RestoreOutcome::Restored),
            Err(DbError::NotFound { .. }) => {
                warn!(item_id = %item_id, quantity = quantity, "Item gone, stock not restored");
                Ok(RestoreOutcome::Skipped)
            }
            Err(e) => Err(PostingError::Store(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_reserve_snapshots_price() {
        let db = test_support::database().await;
        test_support::add_item(&db, "I00001", "Toner HP 85A", 50, 15_000_000).await;

        let ledger = StockLedger::new(&db);
        let reservation = ledger.reserve("I00001", 2).await.unwrap();

        assert_eq!(reservation.item_name, "Toner HP 85A");
        assert_eq!(reservation.unit_price.cents(), 15_000_000);
        assert_eq!(reservation.line_total().unwrap().cents(), 30_000_000);
        // Reserving writes nothing
        assert_eq!(test_support::stock(&db, "I00001").await, Some(50));
    }

    #[tokio::test]
    async fn test_reserve_errors() {
        let db = test_support::database().await;
        test_support::add_item(&db, "I00001", "Toner HP 85A", 50, 15_000_000).await;
        let ledger = StockLedger::new(&db);

        let err = ledger.reserve("I00002", 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ledger.reserve("I00001", 60).await.unwrap_err();
        match err {
            PostingError::InsufficientStock {
                item_name,
                available,
                requested,
            } => {
                assert_eq!(item_name, "Toner HP 85A");
                assert_eq!(available, 50);
                assert_eq!(requested, 60);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commit_decrement_reports_fresh_level() {
        let db = test_support::database().await;
        test_support::add_item(&db, "I00001", "Toner HP 85A", 3, 100).await;
        let ledger = StockLedger::new(&db);

        ledger.commit_decrement("I00001", 2).await.unwrap();
        assert_eq!(test_support::stock(&db, "I00001").await, Some(1));

        let err = ledger.commit_decrement("I00001", 2).await.unwrap_err();
        assert!(matches!(
            err,
            PostingError::InsufficientStock { available: 1, requested: 2, .. }
        ));
        assert_eq!(test_support::stock(&db, "I00001").await, Some(1));

        let err = ledger.commit_decrement("I00009", 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_restore_skips_missing_item() {
        let db = test_support::database().await;
        test_support::add_item(&db, "I00001", "Toner HP 85A", 48, 100).await;
        let ledger = StockLedger::new(&db);

        assert_eq!(
            ledger.restore("I00001", 2).await.unwrap(),
            RestoreOutcome::Restored
        );
        assert_eq!(test_support::stock(&db, "I00001").await, Some(50));

        assert_eq!(
            ledger.restore("I00042", 2).await.unwrap(),
            RestoreOutcome::Skipped
        );
    }
}
