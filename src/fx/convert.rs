//! Currency conversion of money values

use super::base::RateProvider;
use crate::currency::Currency;
use crate::error::{CentinelError, Result};
use crate::money::{Amount, Money};
use chrono::NaiveDate;

/// Convert money into another currency
///
/// Uses the rate stored for `date` when given, otherwise the live rate.
/// Rate lookup failures surface as [`CentinelError::CurrencyMismatch`];
/// the converted amount follows the usual construction rounding and
/// overflow rules.
///
/// # Example
/// ```
/// use centinel::fx::{convert, ExchangeRateManager};
/// use centinel::{Currency, Money};
/// use chrono::NaiveDate;
///
/// let manager = ExchangeRateManager::new();
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// manager.store_historical_rate(Currency::USD, Currency::EUR, 0.95, day).unwrap();
///
/// let dollars = Money::new(100, Currency::USD).unwrap();
/// let euros = convert(&manager, &dollars, Currency::EUR, Some(day)).unwrap();
/// assert_eq!(euros, Money::new(95, Currency::EUR).unwrap());
/// ```
pub fn convert<P: RateProvider + ?Sized>(
    provider: &P,
    money: &Money,
    target: Currency,
    date: Option<NaiveDate>,
) -> Result<Money> {
    if money.currency() == target {
        return Ok(*money);
    }

    let rate = match date {
        Some(date) => provider.get_historical_rate(money.currency(), target, date),
        None => provider.get_rate(money.currency(), target),
    }
    .map_err(|e| {
        log::warn!("Conversion {} -> {} failed: {}", money.currency(), target, e);
        CentinelError::CurrencyMismatch(format!("Currency conversion failed: {}", e))
    })?;

    convert_at_rate(money, target, rate)
}

/// Convert money using an already-resolved rate
pub fn convert_at_rate(money: &Money, target: Currency, rate: f64) -> Result<Money> {
    let rate = Amount::Float(rate).to_decimal()?;
    let converted = money
        .amount()
        .checked_mul(rate)
        .ok_or_else(|| CentinelError::Overflow(format!("Converting {} overflows", money)))?;
    Money::new(converted, target)
}
