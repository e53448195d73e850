//! # Decimal Input Parsing
//!
//! Clients submit numeric fields (price, quantity, storage temperature) as
//! either JSON numbers or numeric strings, depending on the form control
//! that produced them. [`DecimalInput`] accepts both shapes and parses them
//! strictly: a non-numeric or non-finite value is rejected with an error,
//! never silently coerced.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A decimal value as submitted by a client — JSON number or numeric string.
///
/// Range checks (price ≥ 0, quantity > 0, …) are the caller's concern;
/// this type only guarantees the value is a finite decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    /// Submitted as a JSON number.
    Number(f64),
    /// Submitted as a string, e.g. `"12.99"`.
    Text(String),
}

impl DecimalInput {
    /// Parse the input to a finite `f64`.
    pub fn parse(&self) -> Result<f64, CoreError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::InvalidDecimal(format!("not a number: {s:?}")))?,
        };
        if !value.is_finite() {
            return Err(CoreError::InvalidDecimal(format!("not finite: {value}")));
        }
        Ok(value)
    }
}

impl From<f64> for DecimalInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DecimalInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
