//! Pair-keyed cache over a shared exchange rate manager
//!
//! Entries are tagged with the manager's revision; any rate update on the
//! manager invalidates the whole cache on the next lookup.

use super::base::RateProvider;
use super::manager::ExchangeRateManager;
use crate::currency::{Currency, CurrencyPair};
use crate::error::Result;
use chrono::NaiveDate;
use hashbrown::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Default number of cached pairs
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

#[derive(Debug, Default)]
struct CacheState {
    revision: u64,
    entries: HashMap<CurrencyPair, f64>,
}

/// Hit/miss counters for a [`RateCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Caching [`RateProvider`] for bulk conversion
#[derive(Debug)]
pub struct RateCache {
    manager: Arc<ExchangeRateManager>,
    capacity: usize,
    state: RwLock<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RateCache {
    pub fn new(manager: Arc<ExchangeRateManager>) -> Self {
        Self::with_capacity(manager, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(manager: Arc<ExchangeRateManager>, capacity: usize) -> Self {
        Self {
            manager,
            capacity,
            state: RwLock::new(CacheState::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The manager rates are read from
    pub fn manager(&self) -> &Arc<ExchangeRateManager> {
        &self.manager
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: state.entries.len(),
        }
    }

    fn lookup(&self, pair: CurrencyPair, revision: u64) -> Option<f64> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.revision != revision {
            return None;
        }
        state.entries.get(&pair).copied()
    }

    fn remember(&self, pair: CurrencyPair, rate: f64, revision: u64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if revision > state.revision {
            log::debug!(
                "Rate revision {} -> {}, dropping {} cached rates",
                state.revision,
                revision,
                state.entries.len()
            );
            state.entries.clear();
            state.revision = revision;
        }
        if revision == state.revision && state.entries.len() < self.capacity {
            state.entries.insert(pair, rate);
        }
    }
}

impl RateProvider for RateCache {
    fn get_rate(&self, from: Currency, to: Currency) -> Result<f64> {
        if from == to {
            return Ok(1.0);
        }

        let pair = CurrencyPair::new(from, to);
        // Tag with the revision seen before resolving
        let revision = self.manager.revision();
        if let Some(rate) = self.lookup(pair, revision) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(rate);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let rate = self.manager.get_rate(from, to)?;
        self.remember(pair, rate, revision);
        Ok(rate)
    }

    fn get_historical_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Result<f64> {
        self.manager.get_historical_rate(from, to, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit() {
        let cache = RateCache::new(Arc::new(ExchangeRateManager::new()));

        let first = cache.get_rate(Currency::USD, Currency::EUR).unwrap();
        let second = cache.get_rate(Currency::USD, Currency::EUR).unwrap();

        assert_eq!(first, second);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_same_currency_bypasses_cache() {
        let cache = RateCache::new(Arc::new(ExchangeRateManager::empty()));

        assert_eq!(cache.get_rate(Currency::JPY, Currency::JPY).unwrap(), 1.0);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_update_invalidates() {
        let manager = Arc::new(ExchangeRateManager::new());
        let cache = RateCache::new(Arc::clone(&manager));

        assert_eq!(cache.get_rate(Currency::USD, Currency::EUR).unwrap(), 0.85);
        manager.update_rate(Currency::USD, Currency::EUR, 0.9).unwrap();

        assert_eq!(cache.get_rate(Currency::USD, Currency::EUR).unwrap(), 0.9);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_capacity_limit() {
        let cache = RateCache::with_capacity(Arc::new(ExchangeRateManager::new()), 1);

        cache.get_rate(Currency::USD, Currency::EUR).unwrap();
        cache.get_rate(Currency::USD, Currency::GBP).unwrap();

        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = RateCache::new(Arc::new(ExchangeRateManager::empty()));

        assert!(cache.get_rate(Currency::USD, Currency::EUR).is_err());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_historical_passthrough() {
        let manager = Arc::new(ExchangeRateManager::new());
        let day = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        manager
            .store_historical_rate(Currency::EUR, Currency::GBP, 0.85, day)
            .unwrap();

        let cache = RateCache::new(manager);
        assert_eq!(
            cache.get_historical_rate(Currency::EUR, Currency::GBP, day).unwrap(),
            0.85
        );
    }
}
