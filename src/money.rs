//! Fixed-point monetary values
//!
//! A [`Money`] stores a signed 32-bit count of minor units (cents) tagged
//! with a [`Currency`]. Every operation returns a new value and fails with
//! [`CentinelError::Overflow`] instead of wrapping when the result leaves
//! the i32 range.
//!
//! # Example
//! ```
//! use centinel::{Currency, Money};
//!
//! let price = Money::new(100.125, Currency::USD).unwrap();
//! assert_eq!(price.minor_units(), 10013);
//! assert_eq!(price.to_string(), "100.13 USD");
//!
//! let total = price.checked_add(&Money::new(5, Currency::USD).unwrap()).unwrap();
//! assert_eq!(total.to_string(), "105.13 USD");
//! ```

use crate::currency::Currency;
use crate::error::{CentinelError, Result};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

/// Decimal places carried by every currency
const SCALE: u32 = 2;

/// Numeric input accepted by [`Money`] constructors and scalar operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Amount {
    /// Exact decimal view of the input
    ///
    /// Floats go through their shortest round-trip text form, so `1.005`
    /// becomes the decimal `1.005` rather than its binary approximation.
    pub fn to_decimal(self) -> Result<Decimal> {
        match self {
            Amount::Int(v) => Ok(Decimal::from(v)),
            Amount::Decimal(d) => Ok(d),
            Amount::Float(v) => decimal_from_f64(v),
        }
    }

    /// True for an exact zero of any shape
    pub fn is_zero(&self) -> bool {
        match self {
            Amount::Int(v) => *v == 0,
            Amount::Float(v) => *v == 0.0,
            Amount::Decimal(d) => d.is_zero(),
        }
    }
}

macro_rules! amount_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Amount {
                fn from(value: $t) -> Self {
                    Amount::Int(i64::from(value))
                }
            }
        )*
    };
}

amount_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        Amount::Float(f64::from(value))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Decimal(value)
    }
}

fn decimal_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(CentinelError::InvalidAmount(format!(
            "Amount must be a finite number, got: {}",
            value
        )));
    }
    if value == 0.0 {
        return Ok(Decimal::ZERO);
    }

    match Decimal::from_str(&value.to_string()) {
        Ok(d) => Ok(d),
        Err(_) => Decimal::from_f64_retain(value).ok_or_else(|| {
            CentinelError::Overflow(format!("Amount {} exceeds decimal range", value))
        }),
    }
}

/// Rounding applied when an amount carries more than two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingPolicy {
    /// Nearest cent, ties away from zero
    #[default]
    HalfUp,
    /// Toward zero
    Down,
    /// Away from zero
    Up,
}

impl RoundingPolicy {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::Down => RoundingStrategy::ToZero,
            RoundingPolicy::Up => RoundingStrategy::AwayFromZero,
        }
    }
}

/// Immutable monetary amount in one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor_units: i32,
    currency: Currency,
}

impl Money {
    /// Largest representable count of minor units
    pub const MAX_MINOR_UNITS: i32 = i32::MAX;
    /// Smallest representable count of minor units
    pub const MIN_MINOR_UNITS: i32 = i32::MIN;

    /// Create from an amount in major units, rounding half away from zero to the cent
    pub fn new(amount: impl Into<Amount>, currency: Currency) -> Result<Self> {
        Self::with_rounding(amount, currency, RoundingPolicy::HalfUp)
    }

    /// Create from an amount in major units with an explicit rounding policy
    pub fn with_rounding(
        amount: impl Into<Amount>,
        currency: Currency,
        policy: RoundingPolicy,
    ) -> Result<Self> {
        let value = amount.into().to_decimal()?;
        Self::from_decimal(value, currency, policy)
    }

    /// Parse a textual decimal amount such as `"12.34"`
    pub fn parse(text: &str, currency: Currency) -> Result<Self> {
        let value = Decimal::from_str(text.trim()).map_err(|e| {
            CentinelError::InvalidAmount(format!("Amount must be numeric, got {:?}: {}", text, e))
        })?;
        Self::from_decimal(value, currency, RoundingPolicy::HalfUp)
    }

    /// Create directly from a count of minor units
    pub const fn from_minor_units(minor_units: i32, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Zero in the given currency
    pub const fn zero(currency: Currency) -> Self {
        Self::from_minor_units(0, currency)
    }

    fn from_decimal(value: Decimal, currency: Currency, policy: RoundingPolicy) -> Result<Self> {
        let rounded = value.round_dp_with_strategy(SCALE, policy.strategy());
        let minor = rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| overflow("Amount exceeds 4-byte integer limits"))?;
        let minor_units = minor_units_in_range(minor, "Amount exceeds 4-byte integer limits")?;
        Ok(Self::from_minor_units(minor_units, currency))
    }

    /// Count of minor units (cents)
    pub fn minor_units(&self) -> i32 {
        self.minor_units
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Value in major units, exact
    pub fn amount(&self) -> Decimal {
        Decimal::new(i64::from(self.minor_units), SCALE)
    }

    /// Value in major units as a float
    pub fn amount_f64(&self) -> f64 {
        f64::from(self.minor_units) / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(CentinelError::mismatch(self.currency, other.currency));
        }
        Ok(())
    }

    /// Sum of two amounts in the same currency
    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let sum = i64::from(self.minor_units) + i64::from(other.minor_units);
        let minor_units = i32::try_from(sum)
            .map_err(|_| overflow("Addition would exceed integer limits"))?;
        Ok(Self::from_minor_units(minor_units, self.currency))
    }

    /// Difference of two amounts in the same currency
    pub fn checked_sub(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let difference = i64::from(self.minor_units) - i64::from(other.minor_units);
        let minor_units = i32::try_from(difference)
            .map_err(|_| overflow("Subtraction would exceed integer limits"))?;
        Ok(Self::from_minor_units(minor_units, self.currency))
    }

    /// Multiply by a scalar
    ///
    /// The product is rounded to a whole minor unit, range-checked, then
    /// rebuilt through the major-unit constructor, which rounds again to
    /// two decimal places.
    pub fn checked_mul(&self, factor: impl Into<Amount>) -> Result<Money> {
        let factor = factor.into().to_decimal()?;
        let product = Decimal::from(self.minor_units)
            .checked_mul(factor)
            .ok_or_else(|| overflow("Multiplication would exceed integer limits"))?;
        let rounded = product.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let minor_units = minor_units_in_range(rounded, "Multiplication would exceed integer limits")?;
        self.rebuild(minor_units)
    }

    /// Divide by a non-zero scalar, with the same two-stage rounding as [`Money::checked_mul`]
    pub fn checked_div(&self, divisor: impl Into<Amount>) -> Result<Money> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(CentinelError::DivideByZero);
        }
        let divisor = divisor.to_decimal()?;
        if divisor.is_zero() {
            // A non-zero float too small for Decimal
            return Err(overflow("Division would exceed integer limits"));
        }
        let quotient = Decimal::from(self.minor_units)
            .checked_div(divisor)
            .ok_or_else(|| overflow("Division would exceed integer limits"))?;
        let rounded = quotient.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let minor_units = minor_units_in_range(rounded, "Division would exceed integer limits")?;
        self.rebuild(minor_units)
    }

    fn rebuild(&self, minor_units: i32) -> Result<Money> {
        let major = Decimal::new(i64::from(minor_units), SCALE);
        Self::from_decimal(major, self.currency, RoundingPolicy::HalfUp)
    }

    /// Compare two amounts, failing when currencies differ
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.minor_units.cmp(&other.minor_units))
    }
}

fn overflow(message: &str) -> CentinelError {
    CentinelError::Overflow(message.to_string())
}

fn minor_units_in_range(value: Decimal, message: &str) -> Result<i32> {
    value
        .to_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| overflow(message))
}

impl PartialOrd for Money {
    /// `None` across currencies
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount(), self.currency)
    }
}

impl Add for Money {
    type Output = Result<Money>;

    fn add(self, rhs: Money) -> Result<Money> {
        self.checked_add(&rhs)
    }
}

impl Sub for Money {
    type Output = Result<Money>;

    fn sub(self, rhs: Money) -> Result<Money> {
        self.checked_sub(&rhs)
    }
}

impl<A: Into<Amount>> Mul<A> for Money {
    type Output = Result<Money>;

    fn mul(self, rhs: A) -> Result<Money> {
        self.checked_mul(rhs)
    }
}

impl<A: Into<Amount>> Div<A> for Money {
    type Output = Result<Money>;

    fn div(self, rhs: A) -> Result<Money> {
        self.checked_div(rhs)
    }
}
