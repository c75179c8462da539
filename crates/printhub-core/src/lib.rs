//! # printhub-core: Pure Business Logic for PrintHub
//!
//! This crate holds the rules of the printer-service shop as pure functions
//! with zero I/O dependencies. The posting engine (`printhub-engine`) calls
//! into it between store round-trips.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintHub Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Admin Dashboard (React) + thin HTTP layer          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ post / reverse                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  printhub-engine (Posting Engine)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ printhub-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  types  │ │  money  │ │   ids   │ │ benefit │ │validation│ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain rows (InventoryItem, Membership, Transaction, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ids`] - Fixed-width identifier codes (`C00001`, `T00042`, ...)
//! - [`benefit`] - Membership point redemption / accrual rule
//! - [`pricing`] - Stock reservations and candidate total
//! - [`request`] - Posting request and receipt DTOs
//! - [`validation`] - Request validation and line normalisation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use printhub_core::benefit::compute_benefit;
//! use printhub_core::money::Money;
//! use printhub_core::types::Membership;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let membership = Membership {
//!     id: "M00001".to_string(),
//!     customer_id: "C00001".to_string(),
//!     created_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     expiry_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
//!     points: 10_000,
//! };
//!
//! let benefit = compute_benefit(Some(&membership), Money::from_major(300_000), today);
//! assert_eq!(benefit.adjusted_total, Money::from_major(290_000));
//! assert_eq!(benefit.points_delta(), -10_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod benefit;
pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use ids::{EntityCode, EntityKind};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default charge per printed sheet for the printer-service line.
///
/// 100,000 minor units = 1,000.00 per sheet. The engine reads the effective
/// rate from its configuration; this is the fallback.
pub const DEFAULT_PAPER_RATE: Money = Money::from_cents(100_000);

/// Accrual divisor: an active member with no points earns one point per
/// ten whole currency units of the candidate total.
pub const POINTS_EARN_DIVISOR: i64 = 10;

/// Maximum distinct inventory lines in one transaction.
pub const MAX_TRANSACTION_LINES: usize = 100;

/// Maximum quantity of a single item in one transaction.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum sheets billed on one printer-service line.
pub const MAX_PAPER_COUNT: i64 = 100_000;
