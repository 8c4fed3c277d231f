//! Integration tests for the FX system
//!
//! Tests cross-module interactions and real-world usage scenarios

use centinel::batch::BatchProcessor;
use centinel::fx::{convert, ExchangeRateManager, RateCache, RateProvider};
use centinel::{CentinelError, Currency, Money};
use chrono::NaiveDate;
use std::sync::Arc;
use std::thread;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_convert_usd_to_eur_with_seed_rate() {
    let manager = ExchangeRateManager::new();
    let dollars = Money::new(100, Currency::USD).unwrap();

    let euros = convert(&manager, &dollars, Currency::EUR, None).unwrap();
    assert_eq!(euros, Money::new(85.00, Currency::EUR).unwrap());
}

#[test]
fn test_convert_gbp_to_jpy_uses_direct_seed() {
    let manager = ExchangeRateManager::new();
    let pounds = Money::new(100, Currency::GBP).unwrap();

    let yen = convert(&manager, &pounds, Currency::JPY, None).unwrap();
    assert_eq!(yen, Money::new(15_070, Currency::JPY).unwrap());
}

#[test]
fn test_cross_rate_matches_product_of_legs() {
    let manager = ExchangeRateManager::empty();
    manager.update_rate(Currency::EUR, Currency::USD, 1.10).unwrap();
    manager.update_rate(Currency::USD, Currency::GBP, 0.79).unwrap();

    let cross = manager.get_rate(Currency::EUR, Currency::GBP).unwrap();
    let legs = manager.get_rate(Currency::EUR, Currency::USD).unwrap()
        * manager.get_rate(Currency::USD, Currency::GBP).unwrap();
    assert_eq!(cross, legs);

    let euros = Money::new(200, Currency::EUR).unwrap();
    let pounds = convert(&manager, &euros, Currency::GBP, None).unwrap();
    assert_eq!(pounds, Money::new(173.80, Currency::GBP).unwrap());
}

#[test]
fn test_historical_conversion_is_isolated_from_live_rates() {
    let manager = ExchangeRateManager::new();
    let d = day(2023, 12, 29);
    manager
        .store_historical_rate(Currency::USD, Currency::EUR, 0.95, d)
        .unwrap();

    let dollars = Money::new(100, Currency::USD).unwrap();
    let historical = convert(&manager, &dollars, Currency::EUR, Some(d)).unwrap();
    let live = convert(&manager, &dollars, Currency::EUR, None).unwrap();

    assert_eq!(historical, Money::new(95.00, Currency::EUR).unwrap());
    assert_eq!(live, Money::new(85.00, Currency::EUR).unwrap());

    // Reverse direction uses the stored reciprocal
    let euros = Money::new(95, Currency::EUR).unwrap();
    let back = convert(&manager, &euros, Currency::USD, Some(d)).unwrap();
    assert_eq!(back, dollars);
}

#[test]
fn test_historical_missing_date_and_pair() {
    let manager = ExchangeRateManager::new();
    let d = day(2023, 12, 29);

    assert!(matches!(
        manager.get_historical_rate(Currency::USD, Currency::EUR, d),
        Err(CentinelError::InvalidArgument(_))
    ));

    manager
        .store_historical_rate(Currency::USD, Currency::EUR, 0.95, d)
        .unwrap();
    assert!(matches!(
        manager.get_historical_rate(Currency::USD, Currency::JPY, d),
        Err(CentinelError::CurrencyMismatch(_))
    ));
}

#[test]
fn test_independent_managers() {
    let first = ExchangeRateManager::new();
    let second = ExchangeRateManager::new();

    first.update_rate(Currency::USD, Currency::EUR, 0.5).unwrap();

    assert_eq!(first.get_rate(Currency::USD, Currency::EUR).unwrap(), 0.5);
    assert_eq!(second.get_rate(Currency::USD, Currency::EUR).unwrap(), 0.85);
}

#[test]
fn test_concurrent_updates_are_never_torn() {
    let manager = Arc::new(ExchangeRateManager::new());
    let rates = [0.80, 0.85, 0.90, 0.95, 1.05];

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for i in 0..500 {
                    let rate = rates[(i + w) % rates.len()];
                    manager.update_rate(Currency::USD, Currency::EUR, rate).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..500 {
                    let snapshot = manager.known_pairs();
                    let forward = snapshot
                        .iter()
                        .find(|q| q.from == Currency::USD && q.to == Currency::EUR)
                        .unwrap()
                        .rate;
                    let inverse = snapshot
                        .iter()
                        .find(|q| q.from == Currency::EUR && q.to == Currency::USD)
                        .unwrap()
                        .rate;
                    // Seed quotes are not reciprocal; every update pair is
                    if forward != 0.85 || inverse != 1.18 {
                        assert_eq!(inverse, 1.0 / forward);
                    }

                    let dollars = Money::new(10, Currency::USD).unwrap();
                    let euros = convert(manager.as_ref(), &dollars, Currency::EUR, None).unwrap();
                    assert_eq!(euros.currency(), Currency::EUR);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(manager.revision(), 2000);
}

#[test]
fn test_batch_processor_sees_rate_updates() {
    let manager = Arc::new(ExchangeRateManager::new());
    let processor = BatchProcessor::new(Arc::clone(&manager));
    let amounts = vec![Money::new(100, Currency::USD).unwrap(); 5];

    let before = processor.batch_convert(&amounts, Currency::EUR).unwrap();
    assert!(before.iter().all(|m| *m == Money::new(85, Currency::EUR).unwrap()));

    manager.update_rate(Currency::USD, Currency::EUR, 0.9).unwrap();

    let after = processor.batch_convert(&amounts, Currency::EUR).unwrap();
    assert!(after.iter().all(|m| *m == Money::new(90, Currency::EUR).unwrap()));
}

#[test]
fn test_cache_shared_across_threads() {
    let cache = Arc::new(RateCache::new(Arc::new(ExchangeRateManager::new())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(cache.get_rate(Currency::GBP, Currency::EUR).unwrap(), 1.16);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 800);
    assert_eq!(stats.entries, 1);
}

#[test]
fn test_historical_csv_then_convert() {
    let manager = ExchangeRateManager::new();
    let csv_data = "date,from,to,rate\n2024-03-28,GBP,USD,1.2625\n";
    manager.load_historical_csv(csv_data.as_bytes()).unwrap();

    let pounds = Money::new(1000, Currency::GBP).unwrap();
    let dollars = convert(&manager, &pounds, Currency::USD, Some(day(2024, 3, 28))).unwrap();
    assert_eq!(dollars.to_string(), "1262.50 USD");
}
