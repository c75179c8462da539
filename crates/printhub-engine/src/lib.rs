//! # printhub-engine: Transaction Posting for PrintHub
//!
//! Posts print-shop sales and reverses them against a store that offers no
//! multi-statement transactions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintHub Data Flow                               │
//! │                                                                         │
//! │  request handler                                                       │
//! │       │  post_transaction(&req) / reverse_transaction("T00001")        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 printhub-engine (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │  TransactionComposer ──► StockLedger, BenefitCalculator         │   │
//! │  │          │                                                      │   │
//! │  │          └──► CompensationLog (inverse of every commit)         │   │
//! │  │  reversal ──► StockLedger                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │  PostingStore (async trait)                                    │
//! │       ▼                                                                 │
//! │  printhub-db::Database ──► SQLite                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use printhub_db::{Database, DbConfig};
//! use printhub_engine::{EngineConfig, PostingEngine};
//!
//! let db = Database::new(DbConfig::new("./printhub.db")).await?;
//! let engine = PostingEngine::new(Arc::new(db), EngineConfig::from_env()?);
//!
//! let receipt = engine.post_transaction(&request).await?;
//! let report = engine.reverse_transaction(&receipt.transaction_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod benefit;
pub mod compensation;
pub mod composer;
pub mod config;
pub mod error;
pub mod reversal;
pub mod stock_ledger;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use compensation::Compensation;
pub use config::{ConfigError, EngineConfig};
pub use error::{ErrorKind, ErrorReport, PostingError, PostingResult};
pub use store::PostingStore;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use composer::TransactionComposer;
use printhub_core::request::{PostTransactionRequest, PostingReceipt, ReversalReport};

// =============================================================================
// Posting Engine
// =============================================================================

/// Entry point for posting and reversing transactions.
///
/// Cheap to clone; every clone shares the same store.
pub struct PostingEngine<S: PostingStore + ?Sized> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: PostingStore + ?Sized> Clone for PostingEngine<S> {
    fn clone(&self) -> Self {
        PostingEngine {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: PostingStore + ?Sized> PostingEngine<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        PostingEngine { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Posts a sale timestamped now.
    pub async fn post_transaction(
        &self,
        request: &PostTransactionRequest,
    ) -> PostingResult<PostingReceipt> {
        self.post_transaction_at(request, Utc::now()).await
    }

    /// Posts a sale with an explicit timestamp. Memberships are judged
    /// active against the timestamp's UTC date.
    pub async fn post_transaction_at(
        &self,
        request: &PostTransactionRequest,
        now: DateTime<Utc>,
    ) -> PostingResult<PostingReceipt> {
        TransactionComposer::new(self.store.as_ref(), &self.config)
            .post(request, now)
            .await
    }

    /// Deletes a transaction and restores its stock.
    pub async fn reverse_transaction(&self, transaction_id: &str) -> PostingResult<ReversalReport> {
        reversal::reverse(self.store.as_ref(), transaction_id).await
    }
}
