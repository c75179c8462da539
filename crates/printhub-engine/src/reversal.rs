//! # Transaction Reversal
//!
//! Deletes a transaction and puts its stock back.
//!
//! ```text
//!   take inventory lines (DELETE … RETURNING)   claimed exactly once
//!        │
//!        ├── restore each line   restored / skipped / failed, never aborts
//!        ▼
//!   delete printer links, staff links
//!        ▼
//!   delete transaction row   ← decides success
//! ```
//!
//! Points granted or spent by the posting stay as they are.

use tracing::{error, info};

use crate::error::{PostingError, PostingResult};
use crate::stock_ledger::{RestoreOutcome, StockLedger};
use crate::store::PostingStore;
use printhub_core::request::{FailedRestore, RestoredLine, ReversalReport};
use printhub_core::validation::validate_code;
use printhub_core::EntityKind;

/// Reverses the transaction `transaction_id`.
///
/// ## Returns
/// * `Err(PostingError::NotFound)` - no such transaction (including one
///   already reversed)
/// * `Ok(report)` - the transaction is gone; `report` lists stock that could
///   not be restored
pub async fn reverse<S>(store: &S, transaction_id: &str) -> PostingResult<ReversalReport>
where
    S: PostingStore + ?Sized,
{
    let transaction_id = validate_code(EntityKind::Transaction, "transaction_id", transaction_id)?;

    if !store.transaction_exists(&transaction_id).await? {
        return Err(PostingError::not_found("Transaction", &transaction_id));
    }

    let mut report = ReversalReport::new(transaction_id.as_str());
    let ledger = StockLedger::new(store);

    for line in store.take_inventory_lines(&transaction_id).await? {
        match ledger.restore(&line.inventory_id, line.quantity).await {
            Ok(RestoreOutcome::Restored) => report.restored.push(RestoredLine {
                inventory_id: line.inventory_id,
                quantity: line.quantity,
            }),
            Ok(RestoreOutcome::Skipped) => report.skipped.push(RestoredLine {
                inventory_id: line.inventory_id,
                quantity: line.quantity,
            }),
            Err(e) => {
                error!(
                    transaction_id = %transaction_id,
                    item_id = %line.inventory_id,
                    quantity = line.quantity,
                    error = %e,
                    "Stock restore failed"
                );
                report.failed.push(FailedRestore {
                    inventory_id: line.inventory_id,
                    quantity: line.quantity,
                    reason: e.to_string(),
                });
            }
        }
    }

    store.delete_printer_links(&transaction_id).await?;
    store.delete_staff_links(&transaction_id).await?;
    store.delete_transaction(&transaction_id).await?;

    info!(
        transaction_id = %transaction_id,
        restored = report.restored.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Transaction reversed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_unknown_transaction_is_not_found() {
        let db = test_support::database().await;

        let err = reverse(&db, "T00042").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_id_is_validation_error() {
        let db = test_support::database().await;

        let err = reverse(&db, "X1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }
}
