//! # Request and Response DTOs
//!
//! Shapes exchanged with the request handler in front of the posting engine.
//! They mirror the dashboard's JSON, so ts-rs exports them for the frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::benefit::BenefitOutcome;
use crate::money::Money;

// =============================================================================
// Posting Request
// =============================================================================

/// One requested inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRequest {
    pub item_id: String,
    pub quantity: i64,
}

impl LineRequest {
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        LineRequest {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// The printer-service part of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PrinterServiceRequest {
    pub printer_id: String,
    pub paper_count: i64,
}

/// Input to `post_transaction`.
///
/// `payment_method` stays a string here and is parsed during validation,
/// so an unknown method surfaces as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostTransactionRequest {
    pub customer_id: String,
    pub staff_id: String,
    #[serde(default)]
    pub printer_service: Option<PrinterServiceRequest>,
    #[serde(default)]
    pub items: Vec<LineRequest>,
    pub payment_method: String,
}

// =============================================================================
// Posting Receipt
// =============================================================================

/// What a successful posting returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostingReceipt {
    pub transaction_id: String,
    /// Total persisted on the transaction row.
    pub final_total: Money,
    /// Total before the membership rule ran.
    pub candidate_total: Money,
    pub benefit: BenefitOutcome,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reversal Report
// =============================================================================

/// One inventory line seen during reversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestoredLine {
    pub inventory_id: String,
    pub quantity: i64,
}

/// An inventory line whose stock could not be put back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FailedRestore {
    pub inventory_id: String,
    pub quantity: i64,
    pub reason: String,
}

/// Outcome of `reverse_transaction`.
///
/// The transaction is gone whenever a report is returned; `skipped` and
/// `failed` list stock that was not restored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReversalReport {
    pub transaction_id: String,
    /// Lines whose stock was restored.
    pub restored: Vec<RestoredLine>,
    /// Lines whose item no longer exists.
    pub skipped: Vec<RestoredLine>,
    /// Lines whose restore hit a store error.
    pub failed: Vec<FailedRestore>,
}

impl ReversalReport {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        ReversalReport {
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }

    /// True when every line's stock was put back.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }

    /// Total units returned to stock.
    pub fn units_restored(&self) -> i64 {
        self.restored.iter().map(|l| l.quantity).sum()
    }
}
