//! # printhub-db: Database Layer for PrintHub
//!
//! This crate provides database access for PrintHub.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintHub Data Flow                               │
//! │                                                                         │
//! │  printhub-engine (post_transaction / reverse_transaction)              │
//! │       │  via PostingStore                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   printhub-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ InventoryRepo  │   │ 001_init.sql │   │   │
//! │  │   │ SqlitePool    │◄───│ MembershipRepo │   │ 002_seq.sql  │   │   │
//! │  │   │ Connection    │    │ TransactionRepo│   │              │   │   │
//! │  │   │ Management    │    │ SequenceRepo   │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printhub_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./printhub.db")).await?;
//!
//! let item = db.inventory().get_by_id("I00001").await?;
//! let page = db.transactions().list_page(20, 0).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::membership::MembershipRepository;
pub use repository::printer::PrinterRepository;
pub use repository::sequence::SequenceRepository;
pub use repository::staff::StaffRepository;
pub use repository::transaction::{Page, TransactionRepository};
