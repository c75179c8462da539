//! # Posting Errors
//!
//! What a caller of the engine sees when a posting or reversal fails.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PostingError           ErrorKind            Side effects left behind   │
//! │  ─────────────────────  ───────────────────  ─────────────────────────  │
//! │  Validation             VALIDATION_ERROR     none (before any write)    │
//! │  NotFound               NOT_FOUND            none, or fully compensated │
//! │  InsufficientStock      INSUFFICIENT_STOCK   none, or fully compensated │
//! │  Store                  STORE_ERROR          none, or fully compensated │
//! │  PartialFailure         PARTIAL_FAILURE      listed in `uncompensated`  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The request handler turns errors into an [`ErrorReport`]:
//! ```json
//! {
//!   "kind": "INSUFFICIENT_STOCK",
//!   "message": "Insufficient stock for Toner HP 85A: available 50, requested 60"
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::compensation::{describe, Compensation};
use printhub_core::{CoreError, ValidationError};
use printhub_db::DbError;

// =============================================================================
// Posting Error
// =============================================================================

/// Errors returned by `post_transaction` and `reverse_transaction`.
#[derive(Debug, Error)]
pub enum PostingError {
    /// A referenced customer, staff member, printer, item, membership or
    /// transaction does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for {item_name}: available {available}, requested {requested}")]
    InsufficientStock {
        item_name: String,
        available: i64,
        requested: i64,
    },

    /// Missing or malformed request fields.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed for infrastructure reasons.
    #[error("Store error: {0}")]
    Store(#[source] DbError),

    /// A posting failed after some writes committed, and at least one of
    /// their inverses could not be applied.
    #[error(
        "Transaction {transaction_id} failed ({cause}) and could not be fully undone: {}",
        describe(.uncompensated)
    )]
    PartialFailure {
        transaction_id: String,
        cause: Box<PostingError>,
        uncompensated: Vec<Compensation>,
    },
}

impl PostingError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        PostingError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// The machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostingError::NotFound { .. } => ErrorKind::NotFound,
            PostingError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            PostingError::Validation(_) => ErrorKind::ValidationError,
            PostingError::Store(_) => ErrorKind::StoreError,
            PostingError::PartialFailure { .. } => ErrorKind::PartialFailure,
        }
    }

    /// Serializable form for the request handler.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Database errors keep their meaning: a missing row is `NotFound`,
/// everything else is a store failure.
impl From<DbError> for PostingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => PostingError::NotFound { entity, id },
            other => PostingError::Store(other),
        }
    }
}

impl From<CoreError> for PostingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                item_name,
                available,
                requested,
            } => PostingError::InsufficientStock {
                item_name,
                available,
                requested,
            },
            CoreError::Validation(e) => PostingError::Validation(e),
            CoreError::InvalidCode { value, reason } => {
                PostingError::Validation(ValidationError::InvalidFormat {
                    field: "code".to_string(),
                    reason: format!("'{value}': {reason}"),
                })
            }
            // Only reachable when a sequence runs past 99999.
            CoreError::CodeOutOfRange { kind, number } => PostingError::Store(
                DbError::Internal(format!("{kind} code number {number} is outside 1..=99999")),
            ),
        }
    }
}

/// Result type for engine operations.
pub type PostingResult<T> = Result<T, PostingError>;

// =============================================================================
// Error Report
// =============================================================================

/// Machine-readable error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    InsufficientStock,
    ValidationError,
    StoreError,
    PartialFailure,
}

/// Error as returned to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&PostingError> for ErrorReport {
    fn from(err: &PostingError) -> Self {
        err.report()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_stays_not_found() {
        let err: PostingError = DbError::not_found("Transaction", "T00009").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Transaction not found: T00009");
    }

    #[test]
    fn test_other_db_errors_are_store_errors() {
        let err: PostingError = DbError::PoolExhausted.into();
        assert_eq!(err.kind(), ErrorKind::StoreError);
    }

    #[test]
    fn test_invalid_code_names_the_field() {
        let err: PostingError = CoreError::InvalidCode {
            value: "X12".to_string(),
            reason: "unknown prefix".to_string(),
        }
        .into();

        match &err {
            PostingError::Validation(ValidationError::InvalidFormat { field, reason }) => {
                assert_eq!(field, "code");
                assert_eq!(reason, "'X12': unknown prefix");
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_insufficient_stock_report() {
        let err: PostingError = CoreError::InsufficientStock {
            item_name: "Toner HP 85A".to_string(),
            available: 50,
            requested: 60,
        }
        .into();

        let report = err.report();
        assert_eq!(report.kind, ErrorKind::InsufficientStock);
        assert_eq!(
            report.message,
            "Insufficient stock for Toner HP 85A: available 50, requested 60"
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_partial_failure_message_names_leftovers() {
        let err = PostingError::PartialFailure {
            transaction_id: "T00007".to_string(),
            cause: Box::new(PostingError::Store(DbError::PoolExhausted)),
            uncompensated: vec![Compensation::DeleteTransaction {
                transaction_id: "T00007".to_string(),
            }],
        };

        assert_eq!(err.kind(), ErrorKind::PartialFailure);
        let message = err.to_string();
        assert!(message.contains("T00007"));
        assert!(message.contains("Connection pool exhausted"));
        assert!(message.contains("delete transaction T00007"));
    }
}
