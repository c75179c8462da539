//! # Seed Data Generator
//!
//! Populates the database with development data for the posting engine.
//!
//! ## Usage
//! ```bash
//! # Default path (./printhub_dev.db)
//! cargo run -p printhub-db --bin seed
//!
//! # Specify database path
//! cargo run -p printhub-db --bin seed -- --db ./data/printhub.db
//! PRINTHUB_DB_PATH=./data/printhub.db cargo run -p printhub-db --bin seed
//! ```
//!
//! ## Generated Rows
//! - Customers `C00001..`, some with memberships (`M00001..`)
//! - Staff `S00001..`, printers `P00001..`
//! - Inventory items `I00001..` (paper, toner, ink, binding supplies)
//!
//! Memberships cover the three benefit paths: points to redeem, an empty
//! balance that earns, and an expired membership.

use chrono::{Duration, Utc};
use std::env;
use tracing_subscriber::EnvFilter;

use printhub_core::{
    Customer, EntityCode, EntityKind, InventoryItem, Membership, Money, Printer, Staff,
};
use printhub_db::{Database, DbConfig};

const DEFAULT_DB_PATH: &str = "./printhub_dev.db";

const CUSTOMERS: &[(&str, Option<&str>, Option<&str>)] = &[
    ("Andi Wijaya", Some("0812-1111-2222"), Some("andi@example.com")),
    ("Budi Santoso", Some("0813-3333-4444"), None),
    ("Citra Lestari", None, Some("citra@example.com")),
    ("CV Maju Jaya", Some("021-555-0101"), Some("admin@majujaya.co.id")),
    ("Dewi Anggraini", Some("0856-7777-8888"), None),
    ("Eko Prasetyo", None, None),
];

const STAFF: &[(&str, &str)] = &[
    ("Rina", "cashier"),
    ("Joko", "technician"),
    ("Sari", "manager"),
];

const PRINTERS: &[(&str, Option<&str>)] = &[
    ("Front Counter Laser", Some("HP LaserJet Pro M404dn")),
    ("Color Station", Some("Epson L15150")),
    ("Large Format", Some("Canon imagePROGRAF TM-300")),
];

/// (name, stock, unit price in whole units)
const ITEMS: &[(&str, i64, i64)] = &[
    ("Toner HP 85A", 50, 150_000),
    ("Toner HP 26A", 20, 420_000),
    ("Ink Epson 003 Black", 80, 85_000),
    ("Ink Epson 003 Cyan", 60, 85_000),
    ("HVS Paper A4 70gsm (ream)", 120, 48_000),
    ("HVS Paper F4 80gsm (ream)", 90, 58_000),
    ("Photo Paper Glossy A4 (20 sheets)", 40, 35_000),
    ("Spiral Binding Set", 200, 7_500),
    ("Laminating Pouch A4", 300, 2_500),
];

/// (customer index, points, days until expiry; negative = already expired)
const MEMBERSHIPS: &[(usize, i64, i64)] = &[(0, 10_000, 365), (1, 0, 180), (3, 250_000, 30), (4, 500, -15)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut db_path = env::var("PRINTHUB_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PrintHub Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                println!();
                println!("Environment:");
                println!("  PRINTHUB_DB_PATH   Database file path (overridden by --db)");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 PrintHub Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.customers().count().await? + db.inventory().count().await?;
    if existing > 0 {
        println!("⚠ Database already has customers or inventory");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();
    let today = now.date_naive();

    println!();
    println!("Generating reference data...");

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (n, (name, phone, email)) in CUSTOMERS.iter().enumerate() {
        let customer = Customer {
            id: code(EntityKind::Customer, n)?,
            name: name.to_string(),
            phone: phone.map(str::to_string),
            email: email.map(str::to_string),
            created_at: now,
        };
        db.customers().insert(&customer).await?;
        customer_ids.push(customer.id);
    }
    println!("  ✓ {} customers", CUSTOMERS.len());

    for (n, (name, role)) in STAFF.iter().enumerate() {
        let staff = Staff {
            id: code(EntityKind::Staff, n)?,
            name: name.to_string(),
            role: role.to_string(),
            created_at: now,
        };
        db.staff().insert(&staff).await?;
    }
    println!("  ✓ {} staff", STAFF.len());

    for (n, (name, model)) in PRINTERS.iter().enumerate() {
        let printer = Printer {
            id: code(EntityKind::Printer, n)?,
            name: name.to_string(),
            model: model.map(str::to_string),
            created_at: now,
        };
        db.printers().insert(&printer).await?;
    }
    println!("  ✓ {} printers", PRINTERS.len());

    for (n, (name, stock, price)) in ITEMS.iter().enumerate() {
        let item = InventoryItem {
            id: code(EntityKind::Inventory, n)?,
            name: name.to_string(),
            stock: *stock,
            unit_price_cents: Money::from_major(*price).cents(),
            created_at: now,
            updated_at: now,
        };
        db.inventory().insert(&item).await?;
    }
    println!("  ✓ {} inventory items", ITEMS.len());

    for (n, (customer_idx, points, days)) in MEMBERSHIPS.iter().enumerate() {
        let membership = Membership {
            id: code(EntityKind::Membership, n)?,
            customer_id: customer_ids[*customer_idx].clone(),
            created_date: today - Duration::days(365),
            expiry_date: today + Duration::days(*days),
            points: *points,
        };
        db.memberships().insert(&membership).await?;
    }
    println!("  ✓ {} memberships", MEMBERSHIPS.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Code for the `n`th (0-based) seeded row of a kind.
fn code(kind: EntityKind, n: usize) -> Result<String, Box<dyn std::error::Error>> {
    let number = u32::try_from(n + 1)?;
    Ok(EntityCode::new(kind, number)?.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,printhub=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
