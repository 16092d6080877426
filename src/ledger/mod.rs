//! Transaction model and the ledger that owns it.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::{Ledger, LedgerTotals};
pub use transaction::{Transaction, TransactionDraft, TransactionFilter, TransactionKind};
