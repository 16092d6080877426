use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use crate::errors::StorageError;

use super::{KeyValueStore, Result};

/// In-process key-value store. Clones share the same entries, which lets a
/// test reopen a ledger against the "same" durable state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    reject_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, every `set` fails as if the store were full.
    pub fn fail_writes(&self, enabled: bool) {
        self.reject_writes.store(enabled, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Rejected("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected(format!(
                "quota exceeded while writing `{key}`"
            )));
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
