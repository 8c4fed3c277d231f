//! Foreign Exchange (FX) rate system
//!
//! Provides the shared rate table and currency conversion for [`Money`](crate::Money).
//!
//! # Components
//!
//! - **base**: the `RateProvider` trait read by conversion and batch code
//! - **manager**: thread-safe live and historical rate tables with cross-rates
//! - **convert**: conversion of money into another currency
//! - **cache**: pair-keyed cache over a shared manager
//!
//! # Example
//!
//! ```rust
//! use centinel::fx::{convert, ExchangeRateManager, RateProvider};
//! use centinel::{Currency, Money};
//!
//! let manager = ExchangeRateManager::new();
//!
//! // Seeded: 1 USD = 0.85 EUR
//! assert_eq!(manager.get_rate(Currency::USD, Currency::EUR).unwrap(), 0.85);
//!
//! let dollars = Money::new(100, Currency::USD).unwrap();
//! let euros = convert(&manager, &dollars, Currency::EUR, None).unwrap();
//! assert_eq!(euros.to_string(), "85.00 EUR");
//! ```

pub mod base;
pub mod cache;
pub mod convert;
pub mod manager;

pub use base::RateProvider;
pub use cache::{CacheStats, RateCache};
pub use convert::{convert, convert_at_rate};
pub use manager::{ExchangeRateManager, RateQuote, PIVOT_CURRENCIES};
