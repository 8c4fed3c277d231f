//! Tests for error creation, message formatting and propagation

use centinel::advanced::{self, BatchOp};
use centinel::fx::{convert, ExchangeRateManager, RateProvider};
use centinel::{CentinelError, Currency, Money};

#[test]
fn test_error_messages() {
    let cases = [
        (CentinelError::InvalidAmount("NaN".to_string()), "Invalid amount: NaN"),
        (CentinelError::Overflow("too big".to_string()), "Overflow: too big"),
        (
            CentinelError::CurrencyMismatch("USD vs EUR".to_string()),
            "Currency mismatch: USD vs EUR",
        ),
        (
            CentinelError::InvalidArgument("rate".to_string()),
            "Invalid argument: rate",
        ),
        (CentinelError::DivideByZero, "Division by zero"),
        (CentinelError::ConfigError("bad".to_string()), "Configuration error: bad"),
        (CentinelError::ParseError("row 3".to_string()), "Parse error: row 3"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_mismatch_names_both_currencies() {
    let err = CentinelError::mismatch(Currency::GBP, Currency::JPY);
    let msg = err.to_string();
    assert!(msg.contains("GBP"));
    assert!(msg.contains("JPY"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: CentinelError = io.into();
    assert!(matches!(err, CentinelError::IoError(_)));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_overflow_message_from_money() {
    let err = Money::new(21_474_836.48, Currency::USD).unwrap_err();
    assert!(err.to_string().contains("4-byte integer limits"));
}

#[test]
fn test_conversion_failure_message_wraps_cause() {
    let manager = ExchangeRateManager::empty();
    let dollars = Money::new(1, Currency::USD).unwrap();

    let err = convert(&manager, &dollars, Currency::GBP, None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Currency conversion failed"));
    assert!(msg.contains("No exchange rate path from USD to GBP"));
}

#[test]
fn test_rate_errors_are_distinguishable() {
    let manager = ExchangeRateManager::new();

    let invalid = manager
        .update_rate(Currency::USD, Currency::EUR, -0.5)
        .unwrap_err();
    assert!(matches!(invalid, CentinelError::InvalidArgument(_)));
    assert!(invalid.to_string().contains("-0.5"));

    let unreachable = ExchangeRateManager::empty()
        .get_rate(Currency::EUR, Currency::JPY)
        .unwrap_err();
    assert!(matches!(unreachable, CentinelError::CurrencyMismatch(_)));
}

#[test]
fn test_collaborator_errors_pass_through() {
    let dollars = Money::new(100, Currency::USD).unwrap();
    let euros = Money::new(100, Currency::EUR).unwrap();

    assert!(matches!(
        advanced::batch_operation(&[dollars, euros], BatchOp::Max),
        Err(CentinelError::CurrencyMismatch(_))
    ));
    assert!(matches!(
        advanced::percentage_of(&dollars, 150.0),
        Err(CentinelError::InvalidArgument(_))
    ));
    assert!(matches!(
        dollars.checked_div(0),
        Err(CentinelError::DivideByZero)
    ));
}
