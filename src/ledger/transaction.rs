use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    currency::{parse_amount, AmountLocale},
    errors::{Field, ValidationError},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    #[serde(alias = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Amount with the sign it contributes to the balance.
    pub fn signed_value(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.value,
            TransactionKind::Expense => -self.value,
        }
    }

    /// Checks the invariants a stored record must hold.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.value <= Decimal::ZERO {
            return Err(format!(
                "transaction {} has non-positive value {}",
                self.id, self.value
            ));
        }
        if self.description.trim().is_empty() {
            return Err(format!("transaction {} has an empty description", self.id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[serde(alias = "receita")]
    Income,
    #[serde(alias = "despesa")]
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionKind::Income),
            "expense" | "despesa" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind `{other}`")),
        }
    }
}

/// Selects which transactions [`Ledger::list`](super::Ledger::list) returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.kind == TransactionKind::Income,
            TransactionFilter::Expense => transaction.kind == TransactionKind::Expense,
        }
    }
}

impl From<TransactionKind> for TransactionFilter {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => TransactionFilter::Income,
            TransactionKind::Expense => TransactionFilter::Expense,
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "todos" => Ok(TransactionFilter::All),
            other => other
                .parse::<TransactionKind>()
                .map(TransactionFilter::from)
                .map_err(|_| format!("unknown filter `{other}` (use all, income or expense)")),
        }
    }
}

/// Unvalidated user input for a new transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: String,
    pub description: String,
    pub value: String,
    pub kind: TransactionKind,
}

/// The typed fields extracted from an accepted draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidDraft {
    pub date: NaiveDate,
    pub description: String,
    pub value: Decimal,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            value: value.into(),
            kind,
        }
    }

    /// Field presence first, then the amount, then the date.
    pub(crate) fn validate(&self, locale: AmountLocale) -> Result<ValidDraft, ValidationError> {
        let required = [
            (Field::Date, &self.date),
            (Field::Description, &self.description),
            (Field::Value, &self.value),
        ];
        if let Some((field, _)) = required.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        let value = parse_amount(&self.value, locale)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;

        Ok(ValidDraft {
            date,
            description: self.description.clone(),
            value,
            kind: self.kind,
        })
    }
}
