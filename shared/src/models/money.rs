//! Money value type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pricing::{format_amount, DEFAULT_CURRENCY_SYMBOL};

/// A non-negative amount paired with a display symbol.
///
/// The symbol is a cosmetic label only; arithmetic is symbol-agnostic and
/// no currency conversion ever happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub symbol: String,
}

impl Money {
    /// Create a new amount; negative input is clamped to zero.
    pub fn new(amount: f64, symbol: impl Into<String>) -> Self {
        Self {
            amount: amount.max(0.0),
            symbol: symbol.into(),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_CURRENCY_SYMBOL)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_amount(self.amount, &self.symbol))
    }
}
