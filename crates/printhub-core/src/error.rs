//! # Error Types
//!
//! Domain-specific error types for printhub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  printhub-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Request field failures                         │
//! │                                                                         │
//! │  printhub-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  printhub-engine errors                                                │
//! │  └── PostingError     - What the request handler sees (kind + detail)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PostingError → ErrorReport        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough stock to cover the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Post transaction (I00001 × 60)
    ///      │
    ///      ▼
    /// Reserve: available = 50
    ///      │
    ///      ▼
    /// InsufficientStock { item_name: "Toner HP 85A", available: 50, requested: 60 }
    ///      │
    ///      ▼
    /// Dashboard shows: "Only 50 Toner HP 85A in stock"
    /// ```
    #[error("Insufficient stock for {item_name}: available {available}, requested {requested}")]
    InsufficientStock {
        item_name: String,
        available: i64,
        requested: i64,
    },

    /// A business code could not be parsed.
    #[error("Invalid code '{value}': {reason}")]
    InvalidCode { value: String, reason: String },

    /// A sequence number does not fit the five-digit code format.
    #[error("{kind} code number {number} is outside 1..=99999")]
    CodeOutOfRange { kind: String, number: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any store call, so they never leave side effects behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The request would post an empty transaction.
    #[error("a transaction needs inventory lines or a printer service with paper_count > 0")]
    EmptyTransaction,

    /// An amount derived from the request does not fit in minor units.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Too many distinct lines in one request.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
