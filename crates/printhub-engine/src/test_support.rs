//! Rows shared by the unit tests.

use chrono::{Duration, NaiveDate, Utc};

use printhub_core::{Customer, InventoryItem, Membership, Printer, Staff};
use printhub_db::{Database, DbConfig};

pub async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub async fn add_customer(db: &Database, id: &str) {
    db.customers()
        .insert(&Customer {
            id: id.to_string(),
            name: format!("Customer {id}"),
            phone: None,
            email: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
}

/// Customer `C00001`, staff `S00001`, printer `P00001`.
pub async fn add_references(db: &Database) {
    add_customer(db, "C00001").await;

    db.staff()
        .insert(&Staff {
            id: "S00001".to_string(),
            name: "Rina".to_string(),
            role: "cashier".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    db.printers()
        .insert(&Printer {
            id: "P00001".to_string(),
            name: "Front Counter Laser".to_string(),
            model: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
}

pub async fn add_item(db: &Database, id: &str, name: &str, stock: i64, unit_price_cents: i64) {
    let now = Utc::now();
    db.inventory()
        .insert(&InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            stock,
            unit_price_cents,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
}

pub async fn add_membership(
    db: &Database,
    id: &str,
    customer_id: &str,
    points: i64,
    expiry_date: NaiveDate,
) {
    db.memberships()
        .insert(&Membership {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            created_date: expiry_date - Duration::days(365),
            expiry_date,
            points,
        })
        .await
        .unwrap();
}

pub async fn stock(db: &Database, id: &str) -> Option<i64> {
    db.inventory()
        .get_by_id(id)
        .await
        .unwrap()
        .map(|item| item.stock)
}

pub async fn points(db: &Database, id: &str) -> Option<i64> {
    db.memberships()
        .get_by_id(id)
        .await
        .unwrap()
        .map(|m| m.points)
}
