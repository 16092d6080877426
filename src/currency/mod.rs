//! Amount text normalization and parsing.
//!
//! Raw amounts arrive as free text typed by the user. The decimal separator
//! depends on the user's locale, so the rules live here instead of inside the
//! ledger's `add` path.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Which decimal separators are accepted when parsing amount text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AmountLocale {
    /// Either `.` or `,` marks the decimal point.
    #[default]
    Either,
    /// Only `.` is accepted.
    Dot,
    /// Only `,` is accepted.
    Comma,
}

impl AmountLocale {
    /// Rewrites `raw` so the decimal point is always `.`.
    ///
    /// Returns `None` when the text uses a separator the locale forbids.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            AmountLocale::Either => Some(raw.replace(',', ".")),
            AmountLocale::Dot => (!raw.contains(',')).then(|| raw.to_string()),
            AmountLocale::Comma => (!raw.contains('.')).then(|| raw.replace(',', ".")),
        }
    }
}

impl fmt::Display for AmountLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AmountLocale::Either => "either",
            AmountLocale::Dot => "dot",
            AmountLocale::Comma => "comma",
        };
        f.write_str(label)
    }
}

impl FromStr for AmountLocale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "either" | "any" => Ok(AmountLocale::Either),
            "dot" | "." => Ok(AmountLocale::Dot),
            "comma" | "," => Ok(AmountLocale::Comma),
            other => Err(format!("unknown decimal separator `{other}`")),
        }
    }
}

/// Parses a strictly positive amount from user text.
pub fn parse_amount(raw: &str, locale: AmountLocale) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount(raw.to_string());

    let normalized = locale.normalize(raw.trim()).ok_or_else(invalid)?;
    let well_formed = normalized.chars().any(|c| c.is_ascii_digit())
        && normalized
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !well_formed {
        return Err(invalid());
    }

    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    if value <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(value)
}
