//! # Membership Repository
//!
//! Memberships are looked up by customer (one per customer) and their point
//! balance only ever moves by a guarded delta:
//!
//! ```text
//! UPDATE memberships SET points = points + :delta
//! WHERE id = :id AND points + :delta >= 0
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use printhub_core::Membership;

/// Repository for membership operations.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: SqlitePool,
}

impl MembershipRepository {
    /// Creates a new MembershipRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MembershipRepository { pool }
    }

    /// Gets a membership by code.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, customer_id, created_date, expiry_date, points
            FROM memberships
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Gets a customer's membership, active or not.
    pub async fn get_by_customer(&self, customer_id: &str) -> DbResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, customer_id, created_date, expiry_date, points
            FROM memberships
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Gets a customer's membership if it is active on `today`
    /// (`expiry_date >= today`).
    pub async fn find_active(
        &self,
        customer_id: &str,
        today: NaiveDate,
    ) -> DbResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, customer_id, created_date, expiry_date, points
            FROM memberships
            WHERE customer_id = ?1 AND expiry_date >= ?2
            "#,
        )
        .bind(customer_id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Inserts a new membership.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the customer already has one
    /// * `Err(DbError::ForeignKeyViolation)` - the customer doesn't exist
    pub async fn insert(&self, membership: &Membership) -> DbResult<()> {
        debug!(
            id = %membership.id,
            customer_id = %membership.customer_id,
            "Inserting membership"
        );

        sqlx::query(
            r#"
            INSERT INTO memberships (id, customer_id, created_date, expiry_date, points)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&membership.id)
        .bind(&membership.customer_id)
        .bind(membership.created_date)
        .bind(membership.expiry_date)
        .bind(membership.points)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Adds `delta` (possibly negative) to the point balance.
    ///
    /// A zero delta performs no write.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - membership doesn't exist
    /// * `Err(DbError::CheckViolation)` - balance would go negative
    pub async fn apply_points_delta(&self, id: &str, delta: i64) -> DbResult<()> {
        if delta == 0 {
            return Ok(());
        }

        debug!(id = %id, delta = delta, "Applying points delta");

        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET points = points + ?2
            WHERE id = ?1 AND points + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.get_by_id(id).await? {
                None => Err(DbError::not_found("Membership", id)),
                Some(m) => Err(DbError::check(format!(
                    "points balance of {id} is {}, cannot apply {delta}",
                    m.points
                ))),
            };
        }

        Ok(())
    }

    /// Counts memberships.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memberships")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
