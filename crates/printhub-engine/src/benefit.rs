//! # Membership Benefit Calculator
//!
//! Looks up the active membership, runs the pure rule from
//! `printhub_core::benefit`, and writes the resulting point delta.
//!
//! The only writer of `memberships.points`.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::PostingResult;
use crate::store::PostingStore;
use printhub_core::benefit::{compute_benefit, Benefit};
use printhub_core::Money;

/// Applies the membership rule for one posting.
pub struct BenefitCalculator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> BenefitCalculator<'a, S>
where
    S: PostingStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        BenefitCalculator { store }
    }

    /// Computes the adjusted total for `candidate_total` and persists the
    /// point change.
    ///
    /// The returned benefit's `points_delta()` is what was written; the
    /// caller owns compensating it.
    pub async fn apply(
        &self,
        customer_id: &str,
        candidate_total: Money,
        today: NaiveDate,
    ) -> PostingResult<Benefit> {
        let membership = self
            .store
            .find_active_membership(customer_id, today)
            .await?;

        let benefit = compute_benefit(membership.as_ref(), candidate_total, today);
        let delta = benefit.points_delta();

        if let Some(membership_id) = benefit.outcome.membership_id() {
            if delta != 0 {
                self.store.apply_points_delta(membership_id, delta).await?;
            }
        }

        debug!(
            customer_id = %customer_id,
            candidate = candidate_total.cents(),
            adjusted = benefit.adjusted_total.cents(),
            delta = delta,
            "Benefit applied"
        );

        Ok(benefit)
    }
}
