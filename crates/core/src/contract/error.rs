//! Contract error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::contract::types::ContractStatus;

/// Errors that can occur during contract operations.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Attempted an invalid status transition.
    #[error("Invalid contract transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ContractStatus,
        /// The attempted target status.
        to: ContractStatus,
    },

    /// An applicant must be attached before submission.
    #[error("Contract has no applicant")]
    MissingApplicant,

    /// A financing type must be chosen before submission.
    #[error("Contract has no financing type")]
    MissingFinancingType,

    /// The payment term must be a positive installment count.
    #[error("Payment term must be greater than zero")]
    InvalidPaymentTerm,

    /// The principal must be positive.
    #[error("Contract amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// Reservation amount cannot be negative.
    #[error("Reserve amount cannot be negative, got {0}")]
    NegativeReserveAmount(Decimal),

    /// Down payment cannot be negative.
    #[error("Down payment cannot be negative, got {0}")]
    NegativeDownPayment(Decimal),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Reservation and down payment exceed the principal.
    #[error("Reservation and down payment exceed the contract amount by {shortfall}")]
    ScheduleUnderfunded {
        /// How much the scheduled upfront amounts exceed the principal.
        shortfall: Decimal,
    },

    /// A schedule due date fell outside the supported calendar range.
    #[error("Schedule due date overflowed the calendar range")]
    DateOverflow,

    /// The contract still carries an outstanding balance.
    #[error("Contract balance {0} is still outstanding")]
    BalanceOutstanding(Decimal),
}

impl ContractError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::MissingApplicant
            | Self::MissingFinancingType
            | Self::InvalidPaymentTerm
            | Self::NonPositiveAmount(_)
            | Self::NegativeReserveAmount(_)
            | Self::NegativeDownPayment(_)
            | Self::RejectionReasonRequired => 400,
            Self::ScheduleUnderfunded { .. } | Self::BalanceOutstanding(_) => 422,
            Self::DateOverflow => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::MissingApplicant => "MISSING_APPLICANT",
            Self::MissingFinancingType => "MISSING_FINANCING_TYPE",
            Self::InvalidPaymentTerm => "INVALID_PAYMENT_TERM",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::NegativeReserveAmount(_) => "NEGATIVE_RESERVE_AMOUNT",
            Self::NegativeDownPayment(_) => "NEGATIVE_DOWN_PAYMENT",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::ScheduleUnderfunded { .. } => "SCHEDULE_UNDERFUNDED",
            Self::DateOverflow => "DATE_OVERFLOW",
            Self::BalanceOutstanding(_) => "BALANCE_OUTSTANDING",
        }
    }
}
