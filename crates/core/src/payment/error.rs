//! Payment error types.

use lotfin_shared::types::{ContractId, PaymentId};
use thiserror::Error;

use crate::contract::types::ContractStatus;
use crate::payment::types::PaymentStatus;

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Attempted an invalid status transition.
    #[error("Invalid payment transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: PaymentStatus,
        /// The attempted target status.
        to: PaymentStatus,
    },

    /// Receipt artifact is required to submit a payment.
    #[error("A receipt must be attached before submitting a payment")]
    ReceiptRequired,

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The owning contract is not in an approvable state.
    #[error("Contract is {0}, payments can only be approved under an approved contract")]
    ContractNotApproved(ContractStatus),

    /// The payment does not belong to the given contract.
    #[error("Payment {payment_id} does not belong to contract {contract_id}")]
    ContractMismatch {
        /// The payment.
        payment_id: PaymentId,
        /// The contract that was passed in.
        contract_id: ContractId,
    },

    /// A paid payment is missing its collected amount.
    #[error("Payment {0} is paid but has no recorded paid amount")]
    MissingPaidAmount(PaymentId),
}

impl PaymentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::ReceiptRequired
            | Self::RejectionReasonRequired
            | Self::ContractMismatch { .. } => 400,
            Self::ContractNotApproved(_) => 422,
            Self::MissingPaidAmount(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ReceiptRequired => "RECEIPT_REQUIRED",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::ContractNotApproved(_) => "CONTRACT_NOT_APPROVED",
            Self::ContractMismatch { .. } => "CONTRACT_MISMATCH",
            Self::MissingPaidAmount(_) => "MISSING_PAID_AMOUNT",
        }
    }
}
