//! Overdue interest accrual domain types.

use lotfin_shared::types::PaymentId;
use rust_decimal::Decimal;

use crate::accrual::error::AccrualError;
use crate::events::EngineEvent;

/// A recomputed interest amount for one overdue payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestUpdate {
    /// The payment to update.
    pub payment_id: PaymentId,
    /// The interest amount before this run.
    pub previous_interest: Decimal,
    /// The newly computed interest amount.
    pub interest_amount: Decimal,
    /// Days the payment is overdue.
    pub overdue_days: i64,
}

/// A per-payment failure isolated from the rest of the batch.
#[derive(Debug)]
pub struct AccrualFailure {
    /// The payment that could not be processed.
    pub payment_id: PaymentId,
    /// What went wrong.
    pub error: AccrualError,
}

/// Result of one accrual batch run.
#[derive(Debug)]
pub struct AccrualRun {
    /// Interest updates to persist.
    pub updates: Vec<InterestUpdate>,
    /// Payments skipped because of per-item failures.
    pub failures: Vec<AccrualFailure>,
    /// Side effects to dispatch after commit, including the staff summary.
    pub events: Vec<EngineEvent>,
}

impl AccrualRun {
    /// Number of payments whose interest changed in this run.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.updates.len()
    }
}
