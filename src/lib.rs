//! # Centinel
//!
//! Fixed-point money values with currency-safe arithmetic and
//! exchange-rate conversion.
//!
//! Amounts are stored as a signed 32-bit count of cents tagged with a
//! [`Currency`]. Arithmetic never wraps or silently converts: overflow and
//! currency mismatches are reported as [`CentinelError`] values. Rates live
//! in an explicitly constructed [`ExchangeRateManager`](fx::ExchangeRateManager)
//! that is safe to share between threads.
//!
//! ## Example
//!
//! ```rust
//! use centinel::prelude::*;
//!
//! let manager = ExchangeRateManager::new();
//!
//! let subtotal = Money::new(99.99, Currency::USD)?;
//! let shipping = Money::new(5, Currency::USD)?;
//! let total = subtotal.checked_add(&shipping)?;
//!
//! let in_pounds = convert(&manager, &total, Currency::GBP, None)?;
//! assert_eq!(in_pounds.to_string(), "76.64 GBP");
//! # Ok::<(), CentinelError>(())
//! ```

pub mod advanced;
pub mod batch;
pub mod config;
pub mod currency;
pub mod error;
pub mod fx;
pub mod money;

pub use currency::{Currency, CurrencyPair};
pub use error::{CentinelError, Result};
pub use money::{Amount, Money, RoundingPolicy};

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::advanced::BatchOp;
    pub use crate::batch::BatchProcessor;
    pub use crate::config::Config;
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::error::{CentinelError, Result};
    pub use crate::fx::{convert, ExchangeRateManager, RateCache, RateProvider};
    pub use crate::money::{Amount, Money, RoundingPolicy};
}
