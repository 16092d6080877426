use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::{
    currency::AmountLocale,
    errors::{StorageError, ValidationError},
    storage::TransactionStorage,
};

use super::transaction::{
    Transaction, TransactionDraft, TransactionFilter, TransactionKind, ValidDraft,
};

/// Income and expense sums over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// In-memory transaction collection mirrored to a [`TransactionStorage`]
/// after every mutation.
pub struct Ledger {
    transactions: Vec<Transaction>,
    storage: Box<dyn TransactionStorage>,
    locale: AmountLocale,
    last_issued_id: i64,
    storage_failure: Option<StorageError>,
}

impl Ledger {
    /// Restores the previously stored collection.
    ///
    /// Missing or unreadable data yields an empty ledger; the cause is logged
    /// and never returned.
    pub fn load(storage: Box<dyn TransactionStorage>) -> Self {
        let transactions = match storage.load() {
            Ok(Some(transactions)) => {
                info!(count = transactions.len(), "restored stored transactions");
                transactions
            }
            Ok(None) => {
                debug!("no stored transactions, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "stored transactions unreadable, starting empty");
                Vec::new()
            }
        };
        let last_issued_id = transactions.iter().map(|txn| txn.id).max().unwrap_or(0);
        Self {
            transactions,
            storage,
            locale: AmountLocale::default(),
            last_issued_id,
            storage_failure: None,
        }
    }

    /// Sets the decimal separator rules used when parsing draft amounts.
    pub fn with_locale(mut self, locale: AmountLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn set_locale(&mut self, locale: AmountLocale) {
        self.locale = locale;
    }

    pub fn locale(&self) -> AmountLocale {
        self.locale
    }

    /// Validates `draft`, appends the new transaction and persists the collection.
    pub fn add(&mut self, draft: &TransactionDraft) -> Result<Transaction, ValidationError> {
        let ValidDraft {
            date,
            description,
            value,
            kind,
        } = draft.validate(self.locale)?;

        let transaction = Transaction {
            id: self.allocate_id(),
            date,
            description,
            value,
            kind,
        };
        debug!(id = transaction.id, kind = %transaction.kind, "adding transaction");
        self.transactions.push(transaction.clone());
        self.sync();
        Ok(transaction)
    }

    /// Deletes the transaction with `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: i64) -> bool {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            debug!(id, "remove requested for unknown transaction");
            return false;
        };
        self.transactions.remove(index);
        debug!(id, "removed transaction");
        self.sync();
        true
    }

    /// Owned snapshot of the transactions matching `filter`, in insertion order.
    pub fn list(&self, filter: TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect()
    }

    /// Income minus expense across every transaction, regardless of any filter.
    pub fn balance(&self) -> Decimal {
        self.totals().balance
    }

    pub fn totals(&self) -> LedgerTotals {
        let (income, expense) = self.transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), txn| match txn.kind {
                TransactionKind::Income => (income.saturating_add(txn.value), expense),
                TransactionKind::Expense => (income, expense.saturating_add(txn.value)),
            },
        );
        LedgerTotals {
            income,
            expense,
            balance: income.saturating_sub(expense),
        }
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The most recent failed write, cleared by the next successful one.
    pub fn storage_failure(&self) -> Option<&StorageError> {
        self.storage_failure.as_ref()
    }

    /// Writes the current collection now, returning the store's verdict.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.transactions)?;
        self.storage_failure = None;
        Ok(())
    }

    fn sync(&mut self) {
        match self.storage.save(&self.transactions) {
            Ok(()) => self.storage_failure = None,
            Err(err) => {
                error!(error = %err, "failed to persist transactions, keeping in-memory state");
                self.storage_failure = Some(err);
            }
        }
    }

    /// Ids follow the wall clock in epoch milliseconds but never repeat or go
    /// backwards, even after the newest transaction is removed.
    fn allocate_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_issued_id {
            now
        } else {
            self.last_issued_id.saturating_add(1)
        };
        self.last_issued_id = id;
        id
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions)
            .field("locale", &self.locale)
            .field("last_issued_id", &self.last_issued_id)
            .field("storage_failure", &self.storage_failure)
            .finish_non_exhaustive()
    }
}
