//! Bulk addition and conversion with timing metrics

use crate::config::Config;
use crate::currency::Currency;
use crate::error::{CentinelError, Result};
use crate::fx::convert::convert_at_rate;
use crate::fx::{ExchangeRateManager, RateCache, RateProvider};
use crate::money::Money;
use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Summary of the recorded durations for one operation, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub count: usize,
}

/// Thread-safe per-operation timing samples
#[derive(Debug, Default)]
pub struct PerformanceMetrics {
    samples: Mutex<HashMap<String, Vec<f64>>>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one duration in seconds
    pub fn record_operation(&self, operation: &str, duration: f64) {
        let mut samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        samples.entry(operation.to_string()).or_default().push(duration);
    }

    /// Statistics for an operation, `None` if it never ran
    pub fn get_metrics(&self, operation: &str) -> Option<OperationStats> {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        let times = samples.get(operation).filter(|t| !t.is_empty())?;
        Some(OperationStats {
            avg_time: Statistics::mean(times.iter()),
            min_time: Statistics::min(times.iter()),
            max_time: Statistics::max(times.iter()),
            count: times.len(),
        })
    }
}

/// Processes lists of [`Money`] in bulk
///
/// Conversion rates come from a [`RateCache`] over a shared manager and
/// are resolved once per source currency before the parallel pass.
#[derive(Debug)]
pub struct BatchProcessor {
    rates: RateCache,
    chunk_size: usize,
    metrics: PerformanceMetrics,
}

impl BatchProcessor {
    pub const BATCH_ADD: &'static str = "batch_add";
    pub const BATCH_CONVERT: &'static str = "batch_convert";

    pub fn new(manager: Arc<ExchangeRateManager>) -> Self {
        Self::from_config(manager, &Config::default())
    }

    pub fn from_config(manager: Arc<ExchangeRateManager>, config: &Config) -> Self {
        Self {
            rates: RateCache::with_capacity(manager, config.cache_capacity),
            chunk_size: config.batch_chunk_size.max(1),
            metrics: PerformanceMetrics::new(),
        }
    }

    pub fn rates(&self) -> &RateCache {
        &self.rates
    }

    /// Sum amounts sharing one currency
    pub fn batch_add(&self, amounts: &[Money]) -> Result<Money> {
        let start = Instant::now();
        let currency = batch_currency(amounts)?;

        let overflow =
            || CentinelError::Overflow("Batch addition would exceed integer limits".to_string());

        let mut total: i64 = 0;
        for amount in amounts {
            if amount.currency() != currency {
                return Err(CentinelError::mismatch(currency, amount.currency()));
            }
            total = total
                .checked_add(i64::from(amount.minor_units()))
                .ok_or_else(overflow)?;
        }
        let total = i32::try_from(total).map_err(|_| overflow())?;

        self.metrics
            .record_operation(Self::BATCH_ADD, start.elapsed().as_secs_f64());
        Ok(Money::from_minor_units(total, currency))
    }

    /// Convert every amount into `target`, preserving order
    pub fn batch_convert(&self, amounts: &[Money], target: Currency) -> Result<Vec<Money>> {
        let start = Instant::now();
        batch_currency(amounts)?;

        let mut rates: HashMap<Currency, f64> = HashMap::new();
        for amount in amounts {
            if !rates.contains_key(&amount.currency()) {
                let rate = self.rates.get_rate(amount.currency(), target).map_err(|e| {
                    CentinelError::CurrencyMismatch(format!("Currency conversion failed: {}", e))
                })?;
                rates.insert(amount.currency(), rate);
            }
        }

        let converted = amounts
            .par_chunks(self.chunk_size)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|money| {
                        if money.currency() == target {
                            Ok(*money)
                        } else {
                            convert_at_rate(money, target, rates[&money.currency()])
                        }
                    })
                    .collect::<Result<Vec<Money>>>()
            })
            .collect::<Result<Vec<Vec<Money>>>>()?
            .into_iter()
            .flatten()
            .collect();

        self.metrics
            .record_operation(Self::BATCH_CONVERT, start.elapsed().as_secs_f64());
        Ok(converted)
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Statistics for every batch operation that has run
    pub fn performance_metrics(&self) -> HashMap<&'static str, OperationStats> {
        [Self::BATCH_ADD, Self::BATCH_CONVERT]
            .into_iter()
            .filter_map(|op| self.metrics.get_metrics(op).map(|stats| (op, stats)))
            .collect()
    }
}

/// Currency of the first element; empty batches are rejected
fn batch_currency(amounts: &[Money]) -> Result<Currency> {
    amounts
        .first()
        .map(Money::currency)
        .ok_or_else(|| CentinelError::InvalidArgument("Cannot process empty batch".to_string()))
}
