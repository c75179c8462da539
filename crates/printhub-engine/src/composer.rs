//! # Transaction Composer
//!
//! Posts a sale as an ordered pipeline of independent store calls.
//!
//! ## Posting Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read-only phase (any failure: return, nothing written)                 │
//! │    1. validate request                                                  │
//! │    2. customer / staff / printer exist                                  │
//! │    3. reserve every line                                                │
//! │    4. candidate total (overflow is a validation error)                  │
//! │    5. next transaction number                                           │
//! │                                                                         │
//! │  write phase (each commit pushes its inverse)                           │
//! │    6. membership points delta                                           │
//! │    7. transaction row with the adjusted total                           │
//! │    8. staff link, printer link, inventory lines                         │
//! │    9. conditional stock decrement per line                              │
//! │                                                                         │
//! │  failure in 6-9: unwind the log                                         │
//! │    all inverses applied  → original error                               │
//! │    any inverse failed    → PartialFailure                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sequence number is taken before any write. A posting that fails
//! afterwards leaves a gap in the numbering, never a duplicate.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::benefit::BenefitCalculator;
use crate::compensation::{Compensation, CompensationLog};
use crate::config::EngineConfig;
use crate::error::{PostingError, PostingResult};
use crate::stock_ledger::StockLedger;
use crate::store::PostingStore;
use printhub_core::benefit::Benefit;
use printhub_core::pricing::{candidate_total, Reservation};
use printhub_core::request::{PostTransactionRequest, PostingReceipt};
use printhub_core::validation::{validate_request, ValidatedOrder};
use printhub_core::{
    EntityCode, EntityKind, Money, PrinterAssignment, StaffAssignment, Transaction,
    TransactionInventoryLine,
};

/// One posting in flight.
pub struct TransactionComposer<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S> TransactionComposer<'a, S>
where
    S: PostingStore + ?Sized,
{
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        TransactionComposer { store, config }
    }

    /// Posts `request` with `now` as the transaction timestamp. Membership
    /// activity is judged against `now`'s UTC date.
    pub async fn post(
        &self,
        request: &PostTransactionRequest,
        now: DateTime<Utc>,
    ) -> PostingResult<PostingReceipt> {
        let order = validate_request(request)?;
        self.check_references(&order).await?;

        let ledger = StockLedger::new(self.store);
        let mut reservations = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            reservations.push(ledger.reserve(&line.item_id, line.quantity).await?);
        }

        let candidate =
            candidate_total(&reservations, order.paper_count(), self.config.paper_rate)?;

        let number = self
            .store
            .next_sequence_value(EntityKind::Transaction)
            .await?;
        let transaction_id = EntityCode::from_sequence(EntityKind::Transaction, number)?.to_string();

        let mut log = CompensationLog::new();
        let outcome = self
            .write(&order, &reservations, candidate, &transaction_id, now, &mut log)
            .await;

        match outcome {
            Ok(benefit) => {
                info!(
                    transaction_id = %transaction_id,
                    customer_id = %order.customer_id,
                    lines = reservations.len(),
                    candidate = candidate.cents(),
                    total = benefit.adjusted_total.cents(),
                    "Transaction posted"
                );

                Ok(PostingReceipt {
                    transaction_id,
                    final_total: benefit.adjusted_total,
                    candidate_total: candidate,
                    benefit: benefit.outcome,
                    created_at: now,
                })
            }
            Err(cause) => Err(self.compensate(transaction_id, cause, log).await),
        }
    }

    /// Fails with `NotFound` for any referenced row that does not exist.
    async fn check_references(&self, order: &ValidatedOrder) -> PostingResult<()> {
        if !self.store.customer_exists(&order.customer_id).await? {
            return Err(PostingError::not_found("Customer", &order.customer_id));
        }

        if !self.store.staff_exists(&order.staff_id).await? {
            return Err(PostingError::not_found("Staff", &order.staff_id));
        }

        if let Some(service) = &order.printer_service {
            if !self.store.printer_exists(&service.printer_id).await? {
                return Err(PostingError::not_found("Printer", &service.printer_id));
            }
        }

        Ok(())
    }

    /// Steps 6-9. Every committed write is on `log` when this returns.
    async fn write(
        &self,
        order: &ValidatedOrder,
        reservations: &[Reservation],
        candidate: Money,
        transaction_id: &str,
        now: DateTime<Utc>,
        log: &mut CompensationLog,
    ) -> PostingResult<Benefit> {
        let benefit = BenefitCalculator::new(self.store)
            .apply(&order.customer_id, candidate, now.date_naive())
            .await?;
        let delta = benefit.points_delta();
        if delta != 0 {
            if let Some(membership_id) = benefit.outcome.membership_id() {
                log.push(Compensation::RestorePoints {
                    membership_id: membership_id.to_string(),
                    delta: -delta,
                });
            }
        }

        let transaction = Transaction {
            id: transaction_id.to_string(),
            created_at: now,
            total_price_cents: benefit.adjusted_total.cents(),
            payment_method: order.payment_method,
            customer_id: order.customer_id.clone(),
            paper_count: order.paper_count(),
        };
        self.store.insert_transaction(&transaction).await?;
        log.push(Compensation::DeleteTransaction {
            transaction_id: transaction_id.to_string(),
        });

        self.store
            .insert_staff_link(&StaffAssignment {
                transaction_id: transaction_id.to_string(),
                staff_id: order.staff_id.clone(),
            })
            .await?;
        log.push(Compensation::DeleteStaffLinks {
            transaction_id: transaction_id.to_string(),
        });

        if let Some(service) = &order.printer_service {
            self.store
                .insert_printer_link(&PrinterAssignment {
                    transaction_id: transaction_id.to_string(),
                    printer_id: service.printer_id.clone(),
                })
                .await?;
            log.push(Compensation::DeletePrinterLinks {
                transaction_id: transaction_id.to_string(),
            });
        }

        if !reservations.is_empty() {
            let lines: Vec<TransactionInventoryLine> = reservations
                .iter()
                .map(|r| TransactionInventoryLine {
                    transaction_id: transaction_id.to_string(),
                    inventory_id: r.item_id.clone(),
                    quantity: r.quantity,
                })
                .collect();
            self.store.insert_inventory_lines(&lines).await?;
            log.push(Compensation::DeleteInventoryLines {
                transaction_id: transaction_id.to_string(),
            });
        }

        let ledger = StockLedger::new(self.store);
        for reservation in reservations {
            ledger
                .commit_decrement(&reservation.item_id, reservation.quantity)
                .await?;
            log.push(Compensation::RestoreStock {
                item_id: reservation.item_id.clone(),
                quantity: reservation.quantity,
            });
        }

        Ok(benefit)
    }

    /// Unwinds `log` after `cause` and decides what the caller sees.
    async fn compensate(
        &self,
        transaction_id: String,
        cause: PostingError,
        log: CompensationLog,
    ) -> PostingError {
        if log.is_empty() {
            return cause;
        }

        warn!(
            transaction_id = %transaction_id,
            error = %cause,
            steps = log.len(),
            "Posting failed, compensating"
        );

        let uncompensated = log.unwind(self.store).await;
        if uncompensated.is_empty() {
            return cause;
        }

        PostingError::PartialFailure {
            transaction_id,
            cause: Box::new(cause),
            uncompensated,
        }
    }
}
