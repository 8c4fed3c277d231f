//! Base FX system - the RateProvider trait

use crate::currency::Currency;
use crate::error::Result;
use chrono::NaiveDate;

/// Trait for reading FX rates
///
/// Rates are quoted such that: `to_amount = from_amount * rate`.
pub trait RateProvider: Send + Sync {
    /// Get the current exchange rate from one currency to another
    fn get_rate(&self, from: Currency, to: Currency) -> Result<f64>;

    /// Get the exchange rate stored for a specific date
    fn get_historical_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Result<f64>;

    /// Get multiple rates (batch query)
    fn get_rates(&self, currency_pairs: &[(Currency, Currency)]) -> Result<Vec<f64>> {
        currency_pairs
            .iter()
            .map(|(from, to)| self.get_rate(*from, *to))
            .collect()
    }

    /// Check if a current rate is resolvable
    fn has_rate(&self, from: Currency, to: Currency) -> bool {
        self.get_rate(from, to).is_ok()
    }
}
