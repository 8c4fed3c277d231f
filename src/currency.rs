//! Supported currencies and currency pairs

use crate::error::{CentinelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
}

impl Currency {
    /// Every supported currency, in declaration order
    pub const ALL: [Currency; 4] = [Currency::USD, Currency::EUR, Currency::GBP, Currency::JPY];

    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    /// Get all supported currencies
    pub fn all() -> Vec<Currency> {
        Self::ALL.to_vec()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CentinelError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
            .ok_or_else(|| CentinelError::InvalidArgument(format!("Unknown currency: {}", s)))
    }
}

/// Ordered currency pair used as a rate-table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// True when both legs name the same currency
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

impl FromStr for CurrencyPair {
    type Err = CentinelError;

    /// Parse "EUR/USD" or "EURUSD"
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (from, to) = match s.split_once('/') {
            Some(parts) => parts,
            None if s.len() == 6 && s.is_ascii() => s.split_at(3),
            None => {
                return Err(CentinelError::InvalidArgument(format!(
                    "Invalid currency pair format: {}",
                    s
                )))
            }
        };
        Ok(Self::new(from.parse()?, to.parse()?))
    }
}
