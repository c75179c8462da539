//! # Membership Benefit Rule
//!
//! Decides how a customer's membership changes the price of a transaction.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Membership state             │ Adjusted total        │ Points delta    │
//! ├───────────────────────────────┼───────────────────────┼─────────────────┤
//! │  none, or expiry < today      │ candidate             │ 0 (no write)    │
//! │  active, points > 0           │ candidate - used      │ -used           │
//! │     used = min(points, floor(candidate))                                │
//! │  active, points == 0          │ candidate             │ +floor(cand/10) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule runs once per posting over the *candidate* (pre-benefit) total.
//! It never reads the clock: callers pass `today`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Membership;
use crate::POINTS_EARN_DIVISOR;

/// What the membership rule did to a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BenefitOutcome {
    /// No membership, or the membership has expired.
    NoActiveMembership,

    /// Points were spent against the total.
    Redeemed {
        membership_id: String,
        points_used: i64,
    },

    /// A member with an empty balance accrued points.
    Earned {
        membership_id: String,
        points_earned: i64,
    },

    /// Active membership, but nothing to redeem or earn (tiny totals).
    Unchanged { membership_id: String },
}

impl BenefitOutcome {
    /// Membership touched by this outcome, if any.
    pub fn membership_id(&self) -> Option<&str> {
        match self {
            BenefitOutcome::NoActiveMembership => None,
            BenefitOutcome::Redeemed { membership_id, .. }
            | BenefitOutcome::Earned { membership_id, .. }
            | BenefitOutcome::Unchanged { membership_id } => Some(membership_id),
        }
    }
}

/// Result of applying the membership rule to a candidate total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Benefit {
    pub candidate_total: Money,
    pub adjusted_total: Money,
    pub outcome: BenefitOutcome,
}

impl Benefit {
    /// Signed change to the membership's point balance.
    pub fn points_delta(&self) -> i64 {
        match &self.outcome {
            BenefitOutcome::Redeemed { points_used, .. } => -points_used,
            BenefitOutcome::Earned { points_earned, .. } => *points_earned,
            BenefitOutcome::NoActiveMembership | BenefitOutcome::Unchanged { .. } => 0,
        }
    }
}

/// Applies the membership rule.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use printhub_core::benefit::{compute_benefit, BenefitOutcome};
/// use printhub_core::money::Money;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let benefit = compute_benefit(None, Money::from_major(150_000), today);
///
/// assert_eq!(benefit.adjusted_total, Money::from_major(150_000));
/// assert_eq!(benefit.outcome, BenefitOutcome::NoActiveMembership);
/// ```
pub fn compute_benefit(
    membership: Option<&Membership>,
    candidate_total: Money,
    today: NaiveDate,
) -> Benefit {
    let unchanged = |outcome| Benefit {
        candidate_total,
        adjusted_total: candidate_total,
        outcome,
    };

    let membership = match membership {
        Some(m) if m.is_active(today) => m,
        _ => return unchanged(BenefitOutcome::NoActiveMembership),
    };
    let membership_id = membership.id.clone();

    // Totals are never negative, so clamping only guards malformed input.
    let whole_units = candidate_total.whole_units().max(0);

    if membership.points > 0 {
        let points_used = membership.points.min(whole_units);
        if points_used == 0 {
            return unchanged(BenefitOutcome::Unchanged { membership_id });
        }

        return Benefit {
            candidate_total,
            adjusted_total: candidate_total - Money::from_major(points_used),
            outcome: BenefitOutcome::Redeemed {
                membership_id,
                points_used,
            },
        };
    }

    let points_earned = whole_units / POINTS_EARN_DIVISOR;
    if points_earned > 0 {
        unchanged(BenefitOutcome::Earned {
            membership_id,
            points_earned,
        })
    } else {
        unchanged(BenefitOutcome::Unchanged { membership_id })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn member(points: i64, expiry: NaiveDate) -> Membership {
        Membership {
            id: "M00001".to_string(),
            customer_id: "C00001".to_string(),
            created_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expiry_date: expiry,
            points,
        }
    }

    #[test]
    fn test_redeems_points_against_total() {
        let m = member(10_000, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let benefit = compute_benefit(Some(&m), Money::from_major(300_000), today());

        assert_eq!(benefit.adjusted_total, Money::from_major(290_000));
        assert_eq!(benefit.points_delta(), -10_000);
        assert_eq!(benefit.outcome.membership_id(), Some("M00001"));
    }

    #[test]
    fn test_redemption_capped_at_floor_of_total() {
        let m = member(500_000, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let candidate = Money::from_major_minor(1_234, 56);
        let benefit = compute_benefit(Some(&m), candidate, today());

        // floor(1234.56) = 1234 points, leaving the fractional part.
        assert_eq!(benefit.points_delta(), -1_234);
        assert_eq!(benefit.adjusted_total, Money::from_cents(56));
        assert!(!benefit.adjusted_total.is_negative());
    }

    #[test]
    fn test_redemption_can_zero_the_price() {
        let m = member(150_000, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let benefit = compute_benefit(Some(&m), Money::from_major(150_000), today());

        assert!(benefit.adjusted_total.is_zero());
        assert_eq!(benefit.points_delta(), -150_000);
    }

    #[test]
    fn test_empty_balance_earns_tenth_of_total() {
        let m = member(0, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let benefit = compute_benefit(Some(&m), Money::from_major(150_000), today());

        assert_eq!(benefit.adjusted_total, Money::from_major(150_000));
        assert_eq!(benefit.points_delta(), 15_000);
    }

    #[test]
    fn test_earning_floors() {
        let m = member(0, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());

        let benefit = compute_benefit(Some(&m), Money::from_cents(1_999), today());
        assert_eq!(benefit.points_delta(), 1);

        let benefit = compute_benefit(Some(&m), Money::from_cents(999), today());
        assert_eq!(benefit.points_delta(), 0);
        assert!(matches!(benefit.outcome, BenefitOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_expired_membership_is_ignored() {
        let m = member(10_000, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        let benefit = compute_benefit(Some(&m), Money::from_major(300_000), today());

        assert_eq!(benefit.adjusted_total, Money::from_major(300_000));
        assert_eq!(benefit.outcome, BenefitOutcome::NoActiveMembership);
        assert_eq!(benefit.points_delta(), 0);
    }

    #[test]
    fn test_membership_expiring_today_is_active() {
        let m = member(100, today());
        let benefit = compute_benefit(Some(&m), Money::from_major(1_000), today());

        assert_eq!(benefit.points_delta(), -100);
    }

    #[test]
    fn test_sub_unit_total_redeems_nothing() {
        let m = member(100, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let benefit = compute_benefit(Some(&m), Money::from_cents(50), today());

        assert_eq!(benefit.adjusted_total, Money::from_cents(50));
        assert_eq!(benefit.points_delta(), 0);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = BenefitOutcome::Earned {
            membership_id: "M00001".to_string(),
            points_earned: 15,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["type"], "earned");
        assert_eq!(json["points_earned"], 15);
    }
}
