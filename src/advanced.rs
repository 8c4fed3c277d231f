//! Financial formulas and list aggregates built on [`Money`]

use crate::error::{CentinelError, Result};
use crate::money::Money;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Compound interest: `principal * (1 + rate/n)^(n * years)`
///
/// `rate` is the annual rate as a fraction (0.05 for 5%).
pub fn compound_interest(
    principal: &Money,
    rate: f64,
    years: f64,
    compounds_per_year: u32,
) -> Result<Money> {
    if !rate.is_finite() || !years.is_finite() || rate < 0.0 || years < 0.0 || compounds_per_year < 1
    {
        return Err(CentinelError::InvalidArgument(
            "Invalid parameters for compound interest calculation".to_string(),
        ));
    }

    let n = f64::from(compounds_per_year);
    let factor = (1.0 + rate / n).powf(n * years);
    if !factor.is_finite() {
        return Err(CentinelError::Overflow(
            "Compound interest would exceed integer limits".to_string(),
        ));
    }
    principal.checked_mul(factor)
}

/// `percentage` percent of `amount`, with `percentage` in `0..=100`
pub fn percentage_of(amount: &Money, percentage: f64) -> Result<Money> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(CentinelError::InvalidArgument(format!(
            "Percentage must be between 0 and 100, got: {}",
            percentage
        )));
    }
    amount.checked_mul(percentage / 100.0)
}

/// `(revenue - costs) / revenue`
pub fn profit_margin(revenue: &Money, costs: &Money) -> Result<f64> {
    ratio_inputs(revenue, costs, "Revenue")?;
    let revenue_units = f64::from(revenue.minor_units());
    let costs_units = f64::from(costs.minor_units());
    Ok((revenue_units - costs_units) / revenue_units)
}

/// `total_debt / total_equity`
pub fn debt_to_equity(total_debt: &Money, total_equity: &Money) -> Result<f64> {
    ratio_inputs(total_equity, total_debt, "Equity")?;
    Ok(f64::from(total_debt.minor_units()) / f64::from(total_equity.minor_units()))
}

fn ratio_inputs(denominator: &Money, other: &Money, name: &str) -> Result<()> {
    if denominator.currency() != other.currency() {
        return Err(CentinelError::mismatch(denominator.currency(), other.currency()));
    }
    if denominator.is_zero() {
        return Err(CentinelError::InvalidArgument(format!("{} cannot be zero", name)));
    }
    Ok(())
}

/// Aggregate applied by [`batch_operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOp {
    Sum,
    Average,
    Max,
    Min,
}

impl FromStr for BatchOp {
    type Err = CentinelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(BatchOp::Sum),
            "average" | "avg" | "mean" => Ok(BatchOp::Average),
            "max" => Ok(BatchOp::Max),
            "min" => Ok(BatchOp::Min),
            _ => Err(CentinelError::InvalidArgument(format!(
                "Unsupported batch operation: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for BatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchOp::Sum => "sum",
            BatchOp::Average => "average",
            BatchOp::Max => "max",
            BatchOp::Min => "min",
        };
        write!(f, "{}", name)
    }
}

/// Aggregate a non-empty list of amounts sharing one currency
pub fn batch_operation(amounts: &[Money], op: BatchOp) -> Result<Money> {
    let first = amounts.first().ok_or_else(|| {
        CentinelError::InvalidArgument("Cannot perform batch operation on empty list".to_string())
    })?;
    if let Some(other) = amounts.iter().find(|m| m.currency() != first.currency()) {
        return Err(CentinelError::mismatch(first.currency(), other.currency()));
    }

    match op {
        BatchOp::Sum => sum(amounts),
        BatchOp::Average => {
            let total = sum(amounts)?;
            Money::new(total.amount() / Decimal::from(amounts.len()), total.currency())
        }
        BatchOp::Max => Ok(extreme(amounts, |candidate, best| candidate > best)),
        BatchOp::Min => Ok(extreme(amounts, |candidate, best| candidate < best)),
    }
}

fn sum(amounts: &[Money]) -> Result<Money> {
    amounts[1..]
        .iter()
        .try_fold(amounts[0], |total, amount| total.checked_add(amount))
}

/// First amount that no later amount beats
fn extreme(amounts: &[Money], beats: impl Fn(i32, i32) -> bool) -> Money {
    amounts[1..].iter().fold(amounts[0], |best, amount| {
        if beats(amount.minor_units(), best.minor_units()) {
            *amount
        } else {
            best
        }
    })
}
