//! Persistence of the transaction collection.
//!
//! The ledger talks to [`TransactionStorage`]; the bundled implementation,
//! [`TransactionStore`], keeps the whole collection as one JSON blob under a
//! single key of a [`KeyValueStore`].

pub mod file_store;
pub mod memory;

use std::collections::HashSet;

use crate::{errors::StorageError, ledger::Transaction};

pub use file_store::FileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "financialTransactions";

/// Durable, process-local string store.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Abstraction the ledger uses to mirror its collection.
pub trait TransactionStorage: Send + Sync {
    /// Overwrites the stored collection with `transactions`.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Transaction>>>;
}

/// Stores the collection as a JSON array under a fixed key.
#[derive(Debug, Clone)]
pub struct TransactionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TransactionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> TransactionStorage for TransactionStore<S> {
    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let blob = serde_json::to_string(transactions)?;
        self.store.set(&self.key, &blob)
    }

    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        let Some(blob) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let transactions: Vec<Transaction> = serde_json::from_str(&blob)?;
        verify_collection(&transactions)?;
        Ok(Some(transactions))
    }
}

fn verify_collection(transactions: &[Transaction]) -> Result<()> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in transactions {
        txn.check().map_err(StorageError::Corrupt)?;
        if !seen.insert(txn.id) {
            return Err(StorageError::Corrupt(format!(
                "duplicate transaction id {}",
                txn.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample(id: i64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            description: format!("entry {id}"),
            value: dec!(12.34),
            kind,
        }
    }

    #[test]
    fn absent_key_is_no_data() {
        let store = TransactionStore::new(MemoryStore::new());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let store = TransactionStore::new(MemoryStore::new());
        let collection = vec![
            sample(1, TransactionKind::Income),
            sample(2, TransactionKind::Expense),
        ];
        store.save(&collection).expect("save");
        assert_eq!(store.load().expect("load"), Some(collection));

        let precise = Transaction {
            value: dec!(0.1234567890123456789),
            ..sample(3, TransactionKind::Expense)
        };
        store.save(&[precise.clone()]).expect("save precise");
        assert_eq!(store.load().expect("load"), Some(vec![precise]));

        store.save(&[]).expect("save empty");
        assert_eq!(store.load().expect("load"), Some(Vec::new()));
    }

    #[test]
    fn malformed_blob_is_reported() {
        let memory = MemoryStore::new();
        memory.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = TransactionStore::new(memory);
        assert!(matches!(store.load(), Err(StorageError::Serde(_))));
    }

    #[test]
    fn contract_violations_are_corrupt() {
        let memory = MemoryStore::new();
        let store = TransactionStore::new(memory.clone());

        memory
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":1,"date":"2024-01-01","description":"x","value":-3,"kind":"expense"}]"#,
            )
            .unwrap();
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));

        let duplicated = serde_json::to_string(&[
            sample(7, TransactionKind::Income),
            sample(7, TransactionKind::Expense),
        ])
        .unwrap();
        memory.set(DEFAULT_STORAGE_KEY, &duplicated).unwrap();
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn custom_key_is_isolated() {
        let memory = MemoryStore::new();
        let primary = TransactionStore::new(memory.clone());
        let other = TransactionStore::with_key(memory, "sandbox");
        primary
            .save(&[sample(1, TransactionKind::Income)])
            .expect("save");
        assert!(other.load().expect("load").is_none());
        assert_eq!(other.key(), "sandbox");
    }
}
