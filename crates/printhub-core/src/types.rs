//! # Domain Types
//!
//! Core domain rows used throughout PrintHub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Shared, long-lived (mutated in place)                                  │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  InventoryItem  │   │   Membership    │                              │
//! │  │  id (I#####)    │   │  id (M#####)    │                              │
//! │  │  stock  ≥ 0     │   │  customer (1:1) │                              │
//! │  │  unit_price     │   │  points ≥ 0     │                              │
//! │  └────────┬────────┘   └─────────────────┘                              │
//! │           │                                                             │
//! │  Owned by Transaction (created and deleted as one unit)                 │
//! │  ┌────────┴─────────────────┐  ┌──────────────────┐ ┌─────────────────┐ │
//! │  │ TransactionInventoryLine │  │ StaffAssignment  │ │PrinterAssignment│ │
//! │  └────────┬─────────────────┘  └────────┬─────────┘ └────────┬────────┘ │
//! │           └──────────────┬──────────────┴────────────────────┘          │
//! │                  ┌───────┴────────┐                                      │
//! │                  │  Transaction   │  id (T#####), total, payment method │
//! │                  └────────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::Reservation;

// =============================================================================
// Reference Entities
// =============================================================================

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Business code (`C#####`).
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A staff member who handles transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Staff {
    /// Business code (`S#####`).
    pub id: String,
    pub name: String,
    pub role: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A printer used for the print-service line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Printer {
    /// Business code (`P#####`).
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked item sold over the counter (paper, toner, ink, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    /// Business code (`I#####`).
    pub id: String,

    /// Display name, also used in stock error messages.
    pub name: String,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Unit price in minor units. Never negative.
    pub unit_price_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Checks that `quantity` can be taken from current stock and snapshots
    /// the price and name for the transaction.
    ///
    /// Nothing is written: this is the read-side half of a reservation.
    pub fn reserve(&self, quantity: i64) -> CoreResult<Reservation> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity > self.stock {
            return Err(CoreError::InsufficientStock {
                item_name: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }

        Ok(Reservation {
            item_id: self.id.clone(),
            item_name: self.name.clone(),
            unit_price: self.unit_price(),
            quantity,
        })
    }
}

// =============================================================================
// Membership
// =============================================================================

/// A customer's loyalty membership (at most one per customer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Membership {
    /// Business code (`M#####`).
    pub id: String,

    /// Owning customer; unique across memberships.
    pub customer_id: String,

    #[ts(as = "String")]
    pub created_date: NaiveDate,

    /// Last day on which the membership is active.
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// Point balance. One point is worth one whole currency unit.
    pub points: i64,
}

impl Membership {
    /// A membership is active while `expiry_date >= today`.
    #[inline]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.expiry_date >= today
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit or credit card on the counter terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// E-wallet / QR payment.
    EWallet,
}

impl PaymentMethod {
    /// Wire names accepted from the dashboard.
    pub const ALLOWED: [&'static str; 4] = ["cash", "card", "transfer", "e_wallet"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::EWallet => "e_wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "debit" | "credit" => Ok(PaymentMethod::Card),
            "transfer" | "bank_transfer" => Ok(PaymentMethod::Transfer),
            "e_wallet" | "ewallet" | "qris" => Ok(PaymentMethod::EWallet),
            "" => Err(ValidationError::Required {
                field: "payment_method".to_string(),
            }),
            _ => Err(ValidationError::NotAllowed {
                field: "payment_method".to_string(),
                allowed: PaymentMethod::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A posted sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    /// Business code (`T#####`), sequential.
    pub id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Final (post-benefit) total in minor units.
    pub total_price_cents: i64,

    pub payment_method: PaymentMethod,

    pub customer_id: String,

    /// Sheets printed for the print-service line, if any.
    pub paper_count: Option<i64>,
}

impl Transaction {
    /// Returns the final total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Association Rows
// =============================================================================

/// Quantity of one inventory item purchased in a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionInventoryLine {
    pub transaction_id: String,
    pub inventory_id: String,
    pub quantity: i64,
}

/// Staff member who handled a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StaffAssignment {
    pub transaction_id: String,
    pub staff_id: String,
}

/// Printer used for a transaction's print-service line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PrinterAssignment {
    pub transaction_id: String,
    pub printer_id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
