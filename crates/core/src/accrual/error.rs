//! Overdue interest accrual error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while computing overdue interest for one payment.
#[derive(Debug, Error)]
pub enum AccrualError {
    /// The project interest rate must be positive.
    #[error("Project interest rate must be greater than zero, got {0}")]
    NonPositiveRate(Decimal),

    /// The payment carries a non-positive scheduled amount.
    #[error("Payment amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The interest computation overflowed.
    #[error("Interest computation overflowed")]
    Overflow,
}

impl AccrualError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NonPositiveRate(_) | Self::NonPositiveAmount(_) => 422,
            Self::Overflow => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveRate(_) => "NON_POSITIVE_RATE",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::Overflow => "OVERFLOW",
        }
    }
}
