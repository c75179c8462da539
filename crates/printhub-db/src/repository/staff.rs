//! # Staff Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use printhub_core::Staff;

/// Repository for staff rows.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    /// Gets a staff member by code.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT id, name, role, created_at FROM staff WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Checks whether a staff member exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM staff WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new staff member.
    pub async fn insert(&self, staff: &Staff) -> DbResult<()> {
        debug!(id = %staff.id, "Inserting staff");

        sqlx::query("INSERT INTO staff (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&staff.id)
            .bind(&staff.name)
            .bind(&staff.role)
            .bind(staff.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts staff members.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
