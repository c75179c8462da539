//! # Validation Module
//!
//! Turns a raw [`PostTransactionRequest`] into a [`ValidatedOrder`] before the
//! engine touches the store.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Dashboard form (TypeScript)                                   │
//! │  ├── Required fields, numeric inputs                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure, no store access)                          │
//! │  ├── Code formats (C#####, S#####, P#####, I#####)                     │
//! │  ├── Quantity bounds, line count, paper count                          │
//! │  ├── Payment method                                                    │
//! │  └── Duplicate lines merged                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine + SQLite                                               │
//! │  ├── Existence checks (NotFound)                                        │
//! │  └── CHECK (stock >= 0), CHECK (points >= 0), UNIQUE, FOREIGN KEY       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use printhub_core::request::{LineRequest, PostTransactionRequest};
//! use printhub_core::validation::validate_request;
//!
//! let request = PostTransactionRequest {
//!     customer_id: "C00001".to_string(),
//!     staff_id: "S00001".to_string(),
//!     printer_service: None,
//!     items: vec![LineRequest::new("I00001", 1), LineRequest::new("I00001", 1)],
//!     payment_method: "cash".to_string(),
//! };
//!
//! let order = validate_request(&request).unwrap();
//! assert_eq!(order.lines.len(), 1);
//! assert_eq!(order.lines[0].quantity, 2);
//! ```

use serde::Serialize;

use crate::error::ValidationError;
use crate::ids::{EntityCode, EntityKind};
use crate::request::{LineRequest, PostTransactionRequest};
use crate::types::PaymentMethod;
use crate::{MAX_ITEM_QUANTITY, MAX_PAPER_COUNT, MAX_TRANSACTION_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validated Order
// =============================================================================

/// A merged, validated inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub item_id: String,
    pub quantity: i64,
}

/// Printer service that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterService {
    pub printer_id: String,
    pub paper_count: i64,
}

/// A request that is safe to hand to the posting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedOrder {
    pub customer_id: String,
    pub staff_id: String,
    pub printer_service: Option<PrinterService>,
    /// Distinct items in first-seen order.
    pub lines: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
}

impl ValidatedOrder {
    /// Sheets billed on the printer-service line, if a service was requested.
    pub fn paper_count(&self) -> Option<i64> {
        self.printer_service.as_ref().map(|s| s.paper_count)
    }
}

// =============================================================================
// Request Validation
// =============================================================================

/// Validates a posting request.
///
/// ## Rules
/// - `customer_id`, `staff_id`, `payment_method` present and well formed
/// - printer service: `P#####` printer, `paper_count` in 0..=100,000
/// - each line: `I#####` item, quantity 1..=999 (also after merging)
/// - at most 100 distinct items
/// - at least one line, or a printer service with `paper_count > 0`
pub fn validate_request(request: &PostTransactionRequest) -> ValidationResult<ValidatedOrder> {
    let customer_id = validate_code(EntityKind::Customer, "customer_id", &request.customer_id)?;
    let staff_id = validate_code(EntityKind::Staff, "staff_id", &request.staff_id)?;
    let payment_method: PaymentMethod = request.payment_method.parse()?;

    let printer_service = match &request.printer_service {
        Some(service) => {
            let printer_id =
                validate_code(EntityKind::Printer, "printer_id", &service.printer_id)?;
            validate_paper_count(service.paper_count)?;
            Some(PrinterService {
                printer_id,
                paper_count: service.paper_count,
            })
        }
        None => None,
    };

    let lines = merge_lines(&request.items)?;

    let prints_something = printer_service
        .as_ref()
        .is_some_and(|s| s.paper_count > 0);
    if lines.is_empty() && !prints_something {
        return Err(ValidationError::EmptyTransaction);
    }

    Ok(ValidatedOrder {
        customer_id,
        staff_id,
        printer_service,
        lines,
        payment_method,
    })
}

/// Validates each line and merges lines naming the same item.
///
/// Quantities are summed and the first-seen order is kept.
pub fn merge_lines(items: &[LineRequest]) -> ValidationResult<Vec<OrderLine>> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(items.len());

    for item in items {
        let item_id = validate_code(EntityKind::Inventory, "item_id", &item.item_id)?;
        validate_quantity(item.quantity)?;

        match merged.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => {
                line.quantity += item.quantity;
                validate_quantity(line.quantity)?;
            }
            None => {
                if merged.len() == MAX_TRANSACTION_LINES {
                    return Err(ValidationError::TooMany {
                        field: "items".to_string(),
                        max: MAX_TRANSACTION_LINES,
                    });
                }
                merged.push(OrderLine {
                    item_id,
                    quantity: item.quantity,
                });
            }
        }
    }

    Ok(merged)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a business code of the given kind and returns it trimmed.
///
/// ## Example
/// ```rust
/// use printhub_core::ids::EntityKind;
/// use printhub_core::validation::validate_code;
///
/// assert_eq!(validate_code(EntityKind::Staff, "staff_id", " S00001 ").unwrap(), "S00001");
/// assert!(validate_code(EntityKind::Staff, "staff_id", "C00001").is_err());
/// assert!(validate_code(EntityKind::Staff, "staff_id", "").is_err());
/// ```
pub fn validate_code(kind: EntityKind, field: &str, raw: &str) -> ValidationResult<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let code = EntityCode::parse_as(kind, raw).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("expected {}##### (e.g. {})", kind.prefix(), EntityCode::first(kind)),
    })?;

    Ok(code.to_string())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a printer-service paper count. Zero is allowed (no charge).
pub fn validate_paper_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::InvalidFormat {
            field: "paper_count".to_string(),
            reason: "cannot be negative".to_string(),
        });
    }

    if count > MAX_PAPER_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "paper_count".to_string(),
            min: 0,
            max: MAX_PAPER_COUNT,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
