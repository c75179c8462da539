//! # Compensation Log
//!
//! Every write a posting commits pushes its inverse here. If a later step
//! fails, the inverses run newest-first.
//!
//! ```text
//!   committed step                     pushed inverse
//!   ──────────────────────────────     ──────────────────────────────
//!   points += delta               ──►  RestorePoints { -delta }
//!   INSERT transactions           ──►  DeleteTransaction
//!   INSERT transaction_staff      ──►  DeleteStaffLinks
//!   INSERT transaction_printers   ──►  DeletePrinterLinks
//!   INSERT transaction_inventory  ──►  DeleteInventoryLines
//!   stock -= q   (per line)       ──►  RestoreStock { q }
//!
//!   unwind: RestoreStock … DeleteInventoryLines … RestorePoints
//! ```
//!
//! Unwinding never stops at the first failed inverse: it tries them all and
//! returns the ones it could not apply.

use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use crate::store::PostingStore;
use printhub_db::{DbError, DbResult};

/// The inverse of one committed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Compensation {
    /// Apply `delta` to the membership's points (the negated original delta).
    RestorePoints { membership_id: String, delta: i64 },
    DeleteTransaction { transaction_id: String },
    DeleteStaffLinks { transaction_id: String },
    DeletePrinterLinks { transaction_id: String },
    DeleteInventoryLines { transaction_id: String },
    /// Put back stock taken by a committed decrement.
    RestoreStock { item_id: String, quantity: i64 },
}

impl Compensation {
    /// Applies this inverse.
    ///
    /// A row that is already gone counts as deleted.
    pub async fn apply<S>(&self, store: &S) -> DbResult<()>
    where
        S: PostingStore + ?Sized,
    {
        match self {
            Compensation::RestorePoints {
                membership_id,
                delta,
            } => store.apply_points_delta(membership_id, *delta).await,
            Compensation::DeleteTransaction { transaction_id } => {
                match store.delete_transaction(transaction_id).await {
                    Err(DbError::NotFound { .. }) => Ok(()),
                    other => other,
                }
            }
            Compensation::DeleteStaffLinks { transaction_id } => {
                store.delete_staff_links(transaction_id).await.map(|_| ())
            }
            Compensation::DeletePrinterLinks { transaction_id } => {
                store.delete_printer_links(transaction_id).await.map(|_| ())
            }
            Compensation::DeleteInventoryLines { transaction_id } => {
                store.take_inventory_lines(transaction_id).await.map(|_| ())
            }
            Compensation::RestoreStock { item_id, quantity } => {
                store.increment_stock(item_id, *quantity).await
            }
        }
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compensation::RestorePoints {
                membership_id,
                delta,
            } => write!(f, "restore points {delta:+} on {membership_id}"),
            Compensation::DeleteTransaction { transaction_id } => {
                write!(f, "delete transaction {transaction_id}")
            }
            Compensation::DeleteStaffLinks { transaction_id } => {
                write!(f, "delete staff links of {transaction_id}")
            }
            Compensation::DeletePrinterLinks { transaction_id } => {
                write!(f, "delete printer links of {transaction_id}")
            }
            Compensation::DeleteInventoryLines { transaction_id } => {
                write!(f, "delete inventory lines of {transaction_id}")
            }
            Compensation::RestoreStock { item_id, quantity } => {
                write!(f, "restore {quantity} units of {item_id}")
            }
        }
    }
}

/// Formats a list of inverses for error messages.
pub(crate) fn describe(steps: &[Compensation]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered record of inverses for the writes committed so far.
#[derive(Debug, Default)]
pub struct CompensationLog {
    steps: Vec<Compensation>,
}

impl CompensationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the inverse of a write that just committed.
    pub fn push(&mut self, step: Compensation) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Compensation] {
        &self.steps
    }

    /// Applies every inverse, newest first.
    ///
    /// Returns the inverses that failed, in the order they were attempted.
    /// An empty vector means the store is back where it started.
    pub async fn unwind<S>(self, store: &S) -> Vec<Compensation>
    where
        S: PostingStore + ?Sized,
    {
        let mut failed = Vec::new();

        for step in self.steps.into_iter().rev() {
            match step.apply(store).await {
                Ok(()) => warn!(step = %step, "Compensation applied"),
                Err(e) => {
                    error!(step = %step, error = %e, "Compensation failed");
                    failed.push(step);
                }
            }
        }

        failed
    }
}
