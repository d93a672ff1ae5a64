//! Money type for displaying monetary values.
//!
//! Catalog prices are plain decimals and are never rounded in storage or
//! arithmetic. Rounding to the currency's minor unit happens only when a
//! value is formatted for display.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the prefix placed before the amount (e.g., "R$ ").
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::BRL => "R$ ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Separator between the integer and fractional parts.
    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::USD => '.',
            Currency::BRL | Currency::EUR => ',',
        }
    }

    /// Separator between groups of thousands.
    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::USD => ',',
            Currency::BRL | Currency::EUR => '.',
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl FromStr for Currency {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CatalogError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A decimal amount tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Money {
    /// Decimal amount in major units (e.g., reais).
    pub amount: f64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0.0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Format as a display string (e.g., "R$ 1.234,56").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.prefix(), self.display_amount())
    }

    /// Format the amount without the currency prefix (e.g., "1.234,56").
    pub fn display_amount(&self) -> String {
        let cents = (self.amount * 100.0).round();
        let negative = cents < 0.0;
        let cents = cents.abs() as u64;
        let whole = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.currency.thousands_separator());
            }
            grouped.push(digit);
        }

        format!(
            "{}{}{}{:02}",
            if negative { "-" } else { "" },
            grouped,
            self.currency.decimal_separator(),
            fraction
        )
    }

    /// Sum an iterator of decimal amounts in one currency.
    pub fn sum(iter: impl Iterator<Item = f64>, currency: Currency) -> Money {
        Money::new(iter.sum(), currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
