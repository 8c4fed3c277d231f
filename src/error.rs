//! Error types for Centinel

use thiserror::Error;

/// Main error type for Centinel
#[derive(Error, Debug)]
pub enum CentinelError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Division by zero")]
    DivideByZero,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CentinelError {
    /// Mismatch between the currencies of two operands
    pub fn mismatch(left: impl std::fmt::Display, right: impl std::fmt::Display) -> Self {
        CentinelError::CurrencyMismatch(format!("cannot operate on {} and {}", left, right))
    }
}

/// Result type alias for Centinel operations
pub type Result<T> = std::result::Result<T, CentinelError>;
