//! Exchange rate manager
//!
//! Holds the live rate table and a date-indexed historical table behind a
//! single `RwLock`. Writers replace a forward rate and its inverse inside
//! one write guard, so readers never see half of an update.
//!
//! Live lookups fall back to a one-hop cross rate through USD, then EUR.
//! Historical lookups only return exactly stored pairs.

use super::base::RateProvider;
use crate::config::Config;
use crate::currency::{Currency, CurrencyPair};
use crate::error::{CentinelError, Result};
use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Intermediate currencies tried, in order, when no direct rate exists
pub const PIVOT_CURRENCIES: [Currency; 2] = [Currency::USD, Currency::EUR];

/// Direct quotes loaded into every manager built with [`ExchangeRateManager::new`]
const SEED_RATES: [(Currency, Currency, f64); 12] = [
    (Currency::USD, Currency::EUR, 0.85),
    (Currency::USD, Currency::GBP, 0.73),
    (Currency::USD, Currency::JPY, 110.0),
    (Currency::EUR, Currency::USD, 1.18),
    (Currency::EUR, Currency::GBP, 0.86),
    (Currency::EUR, Currency::JPY, 129.5),
    (Currency::GBP, Currency::USD, 1.37),
    (Currency::GBP, Currency::EUR, 1.16),
    (Currency::GBP, Currency::JPY, 150.7),
    (Currency::JPY, Currency::USD, 0.0091),
    (Currency::JPY, Currency::EUR, 0.0077),
    (Currency::JPY, Currency::GBP, 0.0066),
];

/// A single directed rate quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
}

impl RateQuote {
    pub fn new(from: Currency, to: Currency, rate: f64) -> Self {
        Self { from, to, rate }
    }

    /// Reject identical legs and non-positive or non-finite rates
    pub fn validate(&self) -> Result<()> {
        validate_pair(self.from, self.to)?;
        validate_rate(self.rate)
    }
}

#[derive(Debug, Default)]
struct RateTables {
    rates: HashMap<CurrencyPair, f64>,
    historical: BTreeMap<NaiveDate, HashMap<CurrencyPair, f64>>,
    revision: u64,
}

impl RateTables {
    /// Direct read; identity pairs are 1.0 without touching the table
    fn direct(&self, from: Currency, to: Currency) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.rates.get(&CurrencyPair::new(from, to)).copied()
    }

    /// Direct rate, else the first pivot with both legs present
    fn resolve(&self, from: Currency, to: Currency) -> Option<f64> {
        if let Some(rate) = self.direct(from, to) {
            return Some(rate);
        }

        PIVOT_CURRENCIES.iter().find_map(|&pivot| {
            let to_pivot = self.direct(from, pivot)?;
            let from_pivot = self.direct(pivot, to)?;
            log::debug!(
                "Derived {}/{} via {}: {} * {}",
                from,
                to,
                pivot,
                to_pivot,
                from_pivot
            );
            Some(to_pivot * from_pivot)
        })
    }
}

/// Thread-safe store of live and historical exchange rates
///
/// # Example
/// ```
/// use centinel::fx::{ExchangeRateManager, RateProvider};
/// use centinel::Currency;
///
/// let manager = ExchangeRateManager::new();
/// manager.update_rate(Currency::USD, Currency::EUR, 0.9).unwrap();
///
/// assert_eq!(manager.get_rate(Currency::EUR, Currency::USD).unwrap(), 1.0 / 0.9);
/// ```
#[derive(Debug)]
pub struct ExchangeRateManager {
    tables: RwLock<RateTables>,
}

impl ExchangeRateManager {
    /// Create a manager seeded with the built-in direct quotes
    pub fn new() -> Self {
        let rates = SEED_RATES
            .iter()
            .map(|&(from, to, rate)| (CurrencyPair::new(from, to), rate))
            .collect();
        Self::from_tables(RateTables {
            rates,
            ..RateTables::default()
        })
    }

    /// Create a manager with no rates at all
    pub fn empty() -> Self {
        Self::from_tables(RateTables::default())
    }

    /// Create a manager seeded with custom direct quotes
    ///
    /// Quotes are stored as given; inverses are not derived for seeds.
    pub fn with_seed(quotes: &[RateQuote]) -> Result<Self> {
        let mut rates = HashMap::with_capacity(quotes.len());
        for quote in quotes {
            quote.validate()?;
            rates.insert(CurrencyPair::new(quote.from, quote.to), quote.rate);
        }
        Ok(Self::from_tables(RateTables {
            rates,
            ..RateTables::default()
        }))
    }

    /// Create a manager from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.seed_rates {
            Some(quotes) => Self::with_seed(quotes),
            None => Ok(Self::new()),
        }
    }

    fn from_tables(tables: RateTables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RateTables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RateTables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set `from -> to` to `rate` and `to -> from` to its reciprocal
    pub fn update_rate(&self, from: Currency, to: Currency, rate: f64) -> Result<()> {
        validate_pair(from, to)?;
        validate_rate(rate)?;

        let mut tables = self.write();
        tables.rates.insert(CurrencyPair::new(from, to), rate);
        tables.rates.insert(CurrencyPair::new(to, from), 1.0 / rate);
        tables.revision += 1;
        drop(tables);

        log::info!("Updated rate {}/{} = {}", from, to, rate);
        Ok(())
    }

    /// Store a rate and its reciprocal for a calendar date
    pub fn store_historical_rate(
        &self,
        from: Currency,
        to: Currency,
        rate: f64,
        date: NaiveDate,
    ) -> Result<()> {
        validate_pair(from, to)?;
        validate_rate(rate)?;

        let mut tables = self.write();
        let day = tables.historical.entry(date).or_default();
        day.insert(CurrencyPair::new(from, to), rate);
        day.insert(CurrencyPair::new(to, from), 1.0 / rate);
        drop(tables);

        log::info!("Stored historical rate {}/{} = {} on {}", from, to, rate, date);
        Ok(())
    }

    /// Bulk-load historical rates from CSV
    ///
    /// Expected header: `date,from,to,rate` with ISO dates (`2024-01-31`).
    /// Rows are applied in order; the first bad row aborts the load.
    pub fn load_historical_csv<R: Read>(&self, reader: R) -> Result<usize> {
        #[derive(Deserialize)]
        struct HistoricalRow {
            date: NaiveDate,
            from: Currency,
            to: Currency,
            rate: f64,
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut count = 0;
        for (index, row) in csv_reader.deserialize::<HistoricalRow>().enumerate() {
            let row = row.map_err(|e| {
                CentinelError::ParseError(format!("Invalid rate row {}: {}", index + 1, e))
            })?;
            self.store_historical_rate(row.from, row.to, row.rate, row.date)?;
            count += 1;
        }

        Ok(count)
    }

    /// Counter bumped by every successful [`update_rate`](Self::update_rate)
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Snapshot of the live direct quotes, sorted by pair
    pub fn known_pairs(&self) -> Vec<RateQuote> {
        let tables = self.read();
        let mut quotes: Vec<RateQuote> = tables
            .rates
            .iter()
            .map(|(pair, &rate)| RateQuote::new(pair.from, pair.to, rate))
            .collect();
        quotes.sort_by_key(|q| CurrencyPair::new(q.from, q.to));
        quotes
    }

    /// Dates with stored historical rates, ascending
    pub fn historical_dates(&self) -> Vec<NaiveDate> {
        self.read().historical.keys().copied().collect()
    }
}

impl Default for ExchangeRateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RateProvider for ExchangeRateManager {
    fn get_rate(&self, from: Currency, to: Currency) -> Result<f64> {
        if from == to {
            return Ok(1.0);
        }

        self.read().resolve(from, to).ok_or_else(|| {
            CentinelError::CurrencyMismatch(format!(
                "No exchange rate path from {} to {}",
                from, to
            ))
        })
    }

    fn get_historical_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Result<f64> {
        let tables = self.read();
        let day = tables.historical.get(&date).ok_or_else(|| {
            CentinelError::InvalidArgument(format!("No historical rates available for {}", date))
        })?;

        if from == to {
            return Ok(1.0);
        }

        day.get(&CurrencyPair::new(from, to)).copied().ok_or_else(|| {
            CentinelError::CurrencyMismatch(format!(
                "No historical rate available for {} to {} on {}",
                from, to, date
            ))
        })
    }
}

fn validate_rate(rate: f64) -> Result<()> {
    // The stored inverse must also be a positive finite rate
    let inverse = 1.0 / rate;
    if !rate.is_finite() || rate <= 0.0 || !inverse.is_finite() || inverse <= 0.0 {
        return Err(CentinelError::InvalidArgument(format!(
            "Exchange rate must be positive, got: {}",
            rate
        )));
    }
    Ok(())
}

fn validate_pair(from: Currency, to: Currency) -> Result<()> {
    if from == to {
        return Err(CentinelError::InvalidArgument(format!(
            "Cannot quote {} against itself",
            from
        )));
    }
    Ok(())
}
