//! Capital repayment error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::contract::types::ContractStatus;

/// Errors that can occur when applying a capital repayment.
#[derive(Debug, Error)]
pub enum RepaymentError {
    /// Repayments can only be applied to approved contracts.
    #[error("Contract is {0}, capital repayments require an approved contract")]
    ContractNotApproved(ContractStatus),

    /// The repayment amount must be positive.
    #[error("Repayment amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The repayment amount exceeds the outstanding balance.
    #[error("Repayment amount {amount} exceeds the outstanding balance {balance}")]
    ExceedsBalance {
        /// The requested repayment amount.
        amount: Decimal,
        /// The current contract balance.
        balance: Decimal,
    },
}

impl RepaymentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount(_) | Self::ExceedsBalance { .. } => 400,
            Self::ContractNotApproved(_) => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ContractNotApproved(_) => "CONTRACT_NOT_APPROVED",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ExceedsBalance { .. } => "EXCEEDS_BALANCE",
        }
    }
}
