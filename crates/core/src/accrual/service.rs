//! Overdue interest accrual batch.
//!
//! Periodic batch over pending payments whose due date is in the past.
//! Interest is recomputed from scratch each run (`amount × daily rate ×
//! overdue days`), so re-running on an unchanged dataset is a no-op: a
//! payment whose stored interest already equals the computed value is
//! skipped and produces no notification.

use chrono::NaiveDate;
use lotfin_shared::config::AccrualConfig;
use lotfin_shared::types::{ContractId, UserId};
use rust_decimal::prelude::*;

use crate::accrual::error::AccrualError;
use crate::accrual::types::{AccrualFailure, AccrualRun, InterestUpdate};
use crate::events::{EngineEvent, NotificationCategory};
use crate::payment::types::{Payment, PaymentStatus};

/// Days per year used for the daily rate.
const DAYS_PER_YEAR: u32 = 365;

/// Stateless overdue interest accrual service.
pub struct OverdueInterestService;

impl OverdueInterestService {
    /// Runs the accrual batch over the given payments.
    ///
    /// `annual_rate_percent` is the per-project interest rate supplied by
    /// project configuration. `borrower_lookup` resolves a contract to its
    /// borrower for notification purposes; an unresolved borrower only
    /// suppresses the notification, never the update.
    ///
    /// Each payment is processed independently: a per-item failure is
    /// logged, recorded on the run, and does not abort the batch. The run
    /// always ends with one staff summary event carrying the update count.
    pub fn run<F>(
        payments: &[Payment],
        annual_rate_percent: Decimal,
        today: NaiveDate,
        config: &AccrualConfig,
        borrower_lookup: F,
    ) -> AccrualRun
    where
        F: Fn(ContractId) -> Option<UserId>,
    {
        let mut updates = Vec::new();
        let mut failures = Vec::new();
        let mut events = Vec::new();

        for payment in payments {
            if payment.status != PaymentStatus::Pending || payment.due_date >= today {
                continue;
            }

            let overdue_days = (today - payment.due_date).num_days();
            if overdue_days <= config.grace_period_days {
                continue;
            }

            match Self::compute_interest(payment.amount, annual_rate_percent, overdue_days) {
                Ok(interest) => {
                    if interest == payment.interest_amount {
                        continue;
                    }
                    updates.push(InterestUpdate {
                        payment_id: payment.id,
                        previous_interest: payment.interest_amount,
                        interest_amount: interest,
                        overdue_days,
                    });
                    if let Some(borrower) = borrower_lookup(payment.contract_id) {
                        events.push(EngineEvent::Notify {
                            recipient: borrower,
                            title: "Overdue interest applied".to_string(),
                            message: format!(
                                "Your payment due {} is {overdue_days} days overdue; {interest} of interest has accrued.",
                                payment.due_date
                            ),
                            category: NotificationCategory::Interest,
                        });
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        payment_id = %payment.id,
                        %error,
                        "skipping payment in accrual batch"
                    );
                    failures.push(AccrualFailure {
                        payment_id: payment.id,
                        error,
                    });
                }
            }
        }

        events.push(EngineEvent::AccrualSummaryRequested {
            updated: updates.len(),
        });

        AccrualRun {
            updates,
            failures,
            events,
        }
    }

    /// Computes `round(amount × (rate / 100 / 365) × overdue_days, 2)`.
    fn compute_interest(
        amount: Decimal,
        annual_rate_percent: Decimal,
        overdue_days: i64,
    ) -> Result<Decimal, AccrualError> {
        if annual_rate_percent <= Decimal::ZERO {
            return Err(AccrualError::NonPositiveRate(annual_rate_percent));
        }
        if amount <= Decimal::ZERO {
            return Err(AccrualError::NonPositiveAmount(amount));
        }

        let daily_rate = annual_rate_percent
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|r| r.checked_div(Decimal::from(DAYS_PER_YEAR)))
            .ok_or(AccrualError::Overflow)?;

        amount
            .checked_mul(daily_rate)
            .and_then(|i| i.checked_mul(Decimal::from(overdue_days)))
            .map(|i| i.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
            .ok_or(AccrualError::Overflow)
    }
}
