#![allow(dead_code)]

use std::path::Path;

use ledger_core::{
    ledger::{Ledger, TransactionDraft, TransactionKind},
    storage::{FileStore, MemoryStore, TransactionStore},
};

/// Ledger backed by a shared in-memory store; reopen it with [`reopen`].
pub fn memory_ledger() -> (Ledger, MemoryStore) {
    let memory = MemoryStore::new();
    (reopen(&memory), memory)
}

pub fn reopen(memory: &MemoryStore) -> Ledger {
    Ledger::load(Box::new(TransactionStore::new(memory.clone())))
}

/// Ledger persisted as JSON files under `dir`.
pub fn file_ledger(dir: &Path) -> Ledger {
    let store = FileStore::new(dir.to_path_buf()).expect("create file store");
    Ledger::load(Box::new(TransactionStore::new(store)))
}

pub fn income(date: &str, description: &str, value: &str) -> TransactionDraft {
    TransactionDraft::new(date, description, value, TransactionKind::Income)
}

pub fn expense(date: &str, description: &str, value: &str) -> TransactionDraft {
    TransactionDraft::new(date, description, value, TransactionKind::Expense)
}
