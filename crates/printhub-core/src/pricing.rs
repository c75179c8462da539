//! # Pricing
//!
//! Stock reservations and the candidate (pre-benefit) total.
//!
//! ```text
//! candidate = Σ (quantity × unit_price)  +  paper_count × paper_rate
//!             └── one per Reservation ─┘    └── printer service ──┘
//! ```
//!
//! Every step is checked; a total that does not fit in `i64` minor units is
//! a validation failure raised before anything is written.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

/// A successful availability check for one inventory line.
///
/// Carries the price and name as they were at reservation time, so the
/// transaction is priced from one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reservation {
    pub item_id: String,
    pub item_name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl Reservation {
    #[inline]
    pub fn line_total(&self) -> ValidationResult<Money> {
        self.unit_price
            .multiply_quantity(self.quantity)
            .ok_or_else(|| overflow(&self.item_id))
    }
}

/// Charge for the printer-service line. Zero when there is no service or
/// no sheets were printed.
pub fn paper_charge(paper_count: Option<i64>, paper_rate: Money) -> ValidationResult<Money> {
    match paper_count {
        Some(count) if count > 0 => paper_rate
            .multiply_quantity(count)
            .ok_or_else(|| overflow("paper_count")),
        _ => Ok(Money::zero()),
    }
}

/// Sums every reserved line plus the printer-service charge.
///
/// ## Example
/// ```rust
/// use printhub_core::money::Money;
/// use printhub_core::pricing::{candidate_total, Reservation};
///
/// let toner = Reservation {
///     item_id: "I00001".to_string(),
///     item_name: "Toner HP 85A".to_string(),
///     unit_price: Money::from_major(150_000),
///     quantity: 2,
/// };
///
/// let total = candidate_total(&[toner], Some(3), Money::from_major(1_000)).unwrap();
/// assert_eq!(total, Money::from_major(303_000));
/// ```
pub fn candidate_total(
    reservations: &[Reservation],
    paper_count: Option<i64>,
    paper_rate: Money,
) -> ValidationResult<Money> {
    let mut total = paper_charge(paper_count, paper_rate)?;
    for reservation in reservations {
        total = total
            .checked_add(reservation.line_total()?)
            .ok_or_else(|| overflow("total"))?;
    }
    Ok(total)
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}
