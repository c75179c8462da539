//! # Repository Module
//!
//! Database repository implementations for PrintHub.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Posting engine                                                        │
//! │       │                                                                 │
//! │       │  db.inventory().try_decrement_stock("I00001", 2)               │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, item)                                               │
//! │  ├── try_decrement_stock(&self, id, qty)   ← compare-and-set           │
//! │  └── increment_stock(&self, id, qty)                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Every mutating statement touches one row (or one transaction's        │
//! │  association rows) and reports how many rows it matched.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customers
//! - [`staff::StaffRepository`] - Staff members
//! - [`printer::PrinterRepository`] - Printers
//! - [`inventory::InventoryRepository`] - Items and stock deltas
//! - [`membership::MembershipRepository`] - Memberships and point deltas
//! - [`transaction::TransactionRepository`] - Transactions and association rows
//! - [`sequence::SequenceRepository`] - Store-native id sequences

pub mod customer;
pub mod inventory;
pub mod membership;
pub mod printer;
pub mod sequence;
pub mod staff;
pub mod transaction;

/// Rows shared by the repository tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, Utc};
    use printhub_core::{Customer, InventoryItem, Membership, Printer, Staff};

    use crate::{Database, DbConfig};

    pub async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {id}"),
            phone: Some("0812-0000-0000".to_string()),
            email: None,
            created_at: Utc::now(),
        }
    }

    pub fn staff(id: &str) -> Staff {
        Staff {
            id: id.to_string(),
            name: format!("Staff {id}"),
            role: "cashier".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn printer(id: &str) -> Printer {
        Printer {
            id: id.to_string(),
            name: format!("Printer {id}"),
            model: Some("LaserJet Pro M404".to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn item(id: &str, stock: i64, unit_price_cents: i64) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            stock,
            unit_price_cents,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn membership(id: &str, customer_id: &str, points: i64) -> Membership {
        Membership {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            created_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
            points,
        }
    }
}
