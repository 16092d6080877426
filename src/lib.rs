#![doc(test(attr(deny(warnings))))]

//! Ledger Core records income and expense transactions, keeps a running
//! balance, and mirrors the collection to a durable key-value store.
//!
//! ```
//! use ledger_core::{
//!     ledger::{Ledger, TransactionDraft, TransactionFilter, TransactionKind},
//!     storage::{MemoryStore, TransactionStore},
//! };
//!
//! let mut ledger = Ledger::load(Box::new(TransactionStore::new(MemoryStore::new())));
//! ledger
//!     .add(&TransactionDraft::new("2024-01-05", "Salary", "100,00", TransactionKind::Income))
//!     .unwrap();
//! assert_eq!(ledger.list(TransactionFilter::Income).len(), 1);
//! assert_eq!(ledger.balance().to_string(), "100.00");
//! ```

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
