//! Shared fixtures for the engine integration tests.
//!
//! `FaultyStore` wraps a real in-memory `Database` and fails chosen calls,
//! which is how the partial-failure and race paths are driven.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use printhub_core::request::{LineRequest, PostTransactionRequest, PrinterServiceRequest};
use printhub_core::{
    Customer, EntityKind, InventoryItem, Membership, Printer, PrinterAssignment, Staff,
    StaffAssignment, Transaction, TransactionInventoryLine,
};
use printhub_db::{Database, DbConfig, DbError, DbResult};
use printhub_engine::{EngineConfig, PostingEngine, PostingStore};

// =============================================================================
// Seed Rows
// =============================================================================

/// Toner, 50 on hand at 150,000.00.
pub const TONER: &str = "I00001";
/// Paper, 100 on hand at 48,000.00.
pub const PAPER: &str = "I00002";

/// Member with 10,000 points (M00001).
pub const REDEEMER: &str = "C00001";
/// Member with 0 points (M00002).
pub const EARNER: &str = "C00002";
/// No membership.
pub const WALK_IN: &str = "C00003";
/// Membership expired (M00004, 500 points).
pub const LAPSED: &str = "C00004";

pub const CASHIER: &str = "S00001";
pub const LASER: &str = "P00001";

/// A fresh in-memory database with the rows above.
pub async fn seeded_database() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let now = Utc::now();

    for id in [REDEEMER, EARNER, WALK_IN, LAPSED] {
        db.customers()
            .insert(&Customer {
                id: id.to_string(),
                name: format!("Customer {id}"),
                phone: None,
                email: None,
                created_at: now,
            })
            .await
            .unwrap();
    }

    db.staff()
        .insert(&Staff {
            id: CASHIER.to_string(),
            name: "Rina".to_string(),
            role: "cashier".to_string(),
            created_at: now,
        })
        .await
        .unwrap();

    db.printers()
        .insert(&Printer {
            id: LASER.to_string(),
            name: "Front Counter Laser".to_string(),
            model: Some("HP LaserJet Pro M404dn".to_string()),
            created_at: now,
        })
        .await
        .unwrap();

    for (id, name, stock, price_cents) in [
        (TONER, "Toner HP 85A", 50, 15_000_000),
        (PAPER, "HVS Paper A4 70gsm (ream)", 100, 4_800_000),
    ] {
        db.inventory()
            .insert(&InventoryItem {
                id: id.to_string(),
                name: name.to_string(),
                stock,
                unit_price_cents: price_cents,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    let far_future = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
    let long_ago = NaiveDate::from_ymd_opt(2020, 6, 30).unwrap();
    for (id, customer_id, points, expiry) in [
        ("M00001", REDEEMER, 10_000, far_future),
        ("M00002", EARNER, 0, far_future),
        ("M00004", LAPSED, 500, long_ago),
    ] {
        db.memberships()
            .insert(&Membership {
                id: id.to_string(),
                customer_id: customer_id.to_string(),
                created_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                expiry_date: expiry,
                points,
            })
            .await
            .unwrap();
    }

    db
}

/// Engine over a plain database.
pub async fn engine() -> PostingEngine<Database> {
    PostingEngine::new(Arc::new(seeded_database().await), EngineConfig::default())
}

/// Engine over a fault-injecting store.
pub async fn faulty_engine() -> PostingEngine<FaultyStore> {
    let store = FaultyStore::new(seeded_database().await);
    PostingEngine::new(Arc::new(store), EngineConfig::default())
}

// =============================================================================
// Requests
// =============================================================================

pub fn sale(customer_id: &str, items: &[(&str, i64)]) -> PostTransactionRequest {
    PostTransactionRequest {
        customer_id: customer_id.to_string(),
        staff_id: CASHIER.to_string(),
        printer_service: None,
        items: items
            .iter()
            .map(|(id, qty)| LineRequest::new(*id, *qty))
            .collect(),
        payment_method: "cash".to_string(),
    }
}

pub fn with_printing(mut request: PostTransactionRequest, paper_count: i64) -> PostTransactionRequest {
    request.printer_service = Some(PrinterServiceRequest {
        printer_id: LASER.to_string(),
        paper_count,
    });
    request
}

// =============================================================================
// Assertions
// =============================================================================

pub async fn stock(db: &Database, item_id: &str) -> i64 {
    db.inventory()
        .get_by_id(item_id)
        .await
        .unwrap()
        .map(|item| item.stock)
        .unwrap()
}

pub async fn points(db: &Database, membership_id: &str) -> i64 {
    db.memberships()
        .get_by_id(membership_id)
        .await
        .unwrap()
        .map(|m| m.points)
        .unwrap()
}

/// Number of rows across the three association tables for a transaction.
pub async fn association_rows(db: &Database, transaction_id: &str) -> usize {
    let tx = db.transactions();
    tx.get_inventory_lines(transaction_id).await.unwrap().len()
        + tx.get_staff_links(transaction_id).await.unwrap().len()
        + tx.get_printer_links(transaction_id).await.unwrap().len()
}

// =============================================================================
// Fault-Injecting Store
// =============================================================================

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    NextSequence,
    ApplyPoints,
    InsertTransaction,
    DeleteTransaction,
    InsertStaffLink,
    DeleteStaffLinks,
    InsertPrinterLink,
    DeletePrinterLinks,
    InsertInventoryLines,
    TakeInventoryLines,
    DecrementStock,
    IncrementStock,
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    /// Calls to let through before failing.
    skip: usize,
    /// Failures left to inject.
    remaining: usize,
}

/// `PostingStore` that forwards to a `Database` and fails on request.
pub struct FaultyStore {
    inner: Database,
    faults: Mutex<HashMap<StoreOp, Fault>>,
    /// (item, units) taken behind the engine's back before the next
    /// decrement of that item.
    steal: Mutex<Option<(String, i64)>>,
}

impl FaultyStore {
    pub fn new(inner: Database) -> Self {
        FaultyStore {
            inner,
            faults: Mutex::new(HashMap::new()),
            steal: Mutex::new(None),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Fails the next call to `op`.
    pub fn fail(&self, op: StoreOp) {
        self.fail_nth(op, 1);
    }

    /// Fails the `n`th (1-based) call to `op`, once.
    pub fn fail_nth(&self, op: StoreOp, n: usize) {
        self.faults.lock().unwrap().insert(
            op,
            Fault {
                skip: n - 1,
                remaining: 1,
            },
        );
    }

    /// Simulates a concurrent posting taking `units` of `item_id` right
    /// before the engine's own decrement of it.
    pub fn steal_before_decrement(&self, item_id: &str, units: i64) {
        *self.steal.lock().unwrap() = Some((item_id.to_string(), units));
    }

    fn check(&self, op: StoreOp) -> DbResult<()> {
        let mut faults = self.faults.lock().unwrap();
        if let Some(fault) = faults.get_mut(&op) {
            if fault.skip > 0 {
                fault.skip -= 1;
            } else if fault.remaining > 0 {
                fault.remaining -= 1;
                return Err(DbError::QueryFailed(format!("injected fault in {op:?}")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PostingStore for FaultyStore {
    async fn customer_exists(&self, id: &str) -> DbResult<bool> {
        self.inner.customer_exists(id).await
    }

    async fn staff_exists(&self, id: &str) -> DbResult<bool> {
        self.inner.staff_exists(id).await
    }

    async fn printer_exists(&self, id: &str) -> DbResult<bool> {
        self.inner.printer_exists(id).await
    }

    async fn transaction_exists(&self, id: &str) -> DbResult<bool> {
        self.inner.transaction_exists(id).await
    }

    async fn get_item(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        self.inner.get_item(id).await
    }

    async fn find_active_membership(
        &self,
        customer_id: &str,
        today: NaiveDate,
    ) -> DbResult<Option<Membership>> {
        self.inner.find_active_membership(customer_id, today).await
    }

    async fn next_sequence_value(&self, kind: EntityKind) -> DbResult<i64> {
        self.check(StoreOp::NextSequence)?;
        self.inner.next_sequence_value(kind).await
    }

    async fn apply_points_delta(&self, membership_id: &str, delta: i64) -> DbResult<()> {
        self.check(StoreOp::ApplyPoints)?;
        self.inner.apply_points_delta(membership_id, delta).await
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> DbResult<()> {
        self.check(StoreOp::InsertTransaction)?;
        self.inner.insert_transaction(transaction).await
    }

    async fn delete_transaction(&self, id: &str) -> DbResult<()> {
        self.check(StoreOp::DeleteTransaction)?;
        self.inner.delete_transaction(id).await
    }

    async fn insert_staff_link(&self, link: &StaffAssignment) -> DbResult<()> {
        self.check(StoreOp::InsertStaffLink)?;
        self.inner.insert_staff_link(link).await
    }

    async fn delete_staff_links(&self, transaction_id: &str) -> DbResult<u64> {
        self.check(StoreOp::DeleteStaffLinks)?;
        self.inner.delete_staff_links(transaction_id).await
    }

    async fn insert_printer_link(&self, link: &PrinterAssignment) -> DbResult<()> {
        self.check(StoreOp::InsertPrinterLink)?;
        self.inner.insert_printer_link(link).await
    }

    async fn delete_printer_links(&self, transaction_id: &str) -> DbResult<u64> {
        self.check(StoreOp::DeletePrinterLinks)?;
        self.inner.delete_printer_links(transaction_id).await
    }

    async fn insert_inventory_lines(&self, lines: &[TransactionInventoryLine]) -> DbResult<()> {
        self.check(StoreOp::InsertInventoryLines)?;
        self.inner.insert_inventory_lines(lines).await
    }

    async fn take_inventory_lines(
        &self,
        transaction_id: &str,
    ) -> DbResult<Vec<TransactionInventoryLine>> {
        self.check(StoreOp::TakeInventoryLines)?;
        self.inner.take_inventory_lines(transaction_id).await
    }

    async fn try_decrement_stock(&self, item_id: &str, quantity: i64) -> DbResult<bool> {
        self.check(StoreOp::DecrementStock)?;

        let stolen = {
            let mut steal = self.steal.lock().unwrap();
            if steal.as_ref().is_some_and(|(id, _)| id == item_id) {
                steal.take()
            } else {
                None
            }
        };
        if let Some((id, units)) = stolen {
            assert!(self.inner.try_decrement_stock(&id, units).await?);
        }

        self.inner.try_decrement_stock(item_id, quantity).await
    }

    async fn increment_stock(&self, item_id: &str, quantity: i64) -> DbResult<()> {
        self.check(StoreOp::IncrementStock)?;
        self.inner.increment_stock(item_id, quantity).await
    }
}
