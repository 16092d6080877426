use std::fmt;

use thiserror::Error;

/// Input fields a [`TransactionDraft`](crate::ledger::TransactionDraft) must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Description,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Date => "date",
            Field::Description => "description",
            Field::Value => "value",
        };
        f.write_str(label)
    }
}

/// Rejected user input. Raised before any mutation takes place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field: {0}")]
    MissingField(Field),
    #[error("invalid amount: `{0}`")]
    InvalidAmount(String),
    #[error("invalid date: `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Failures of the durable store or of the blob it holds.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Corrupted ledger data: {0}")]
    Corrupt(String),
    #[error("Store rejected write: {0}")]
    Rejected(String),
}

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
