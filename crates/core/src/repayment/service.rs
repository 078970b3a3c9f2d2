//! Capital repayment application and readjustment marking.
//!
//! An out-of-schedule principal reduction shrinks the contract balance and
//! leaves the tail of the schedule stale: the latest-due pending payments
//! that still cover the remaining balance must be recomputed. This service
//! decides WHICH payments to mark; the recalculation itself is a separate
//! process outside this engine.

use chrono::NaiveDate;
use lotfin_shared::types::PaymentId;
use rust_decimal::Decimal;

use crate::contract::types::{Contract, ContractStatus};
use crate::events::{EngineEvent, NotificationCategory};
use crate::ledger::NewLedgerEntry;
use crate::ledger::types::EntryType;
use crate::payment::types::{Payment, PaymentStatus};
use crate::repayment::error::RepaymentError;

/// Result of applying a capital repayment.
///
/// The balance update, the prepayment entry, and the readjustment marks
/// must be persisted in one atomic unit.
#[derive(Debug, Clone)]
pub struct RepaymentOutcome {
    /// Contract balance after the repayment.
    pub new_balance: Decimal,
    /// The `Prepayment` ledger entry to append.
    pub entry: NewLedgerEntry,
    /// Pending payments to move into the `Readjustment` status, latest
    /// due date first.
    pub marked_for_readjustment: Vec<PaymentId>,
    /// True when the repayment settled the full balance and the contract
    /// must be closed.
    pub close_contract: bool,
    /// Side effects to dispatch after commit.
    pub events: Vec<EngineEvent>,
}

/// Stateless capital repayment service.
pub struct RepaymentService;

impl RepaymentService {
    /// Applies a capital repayment to an approved contract.
    ///
    /// Marking rule: walk the contract's pending payments ordered by due
    /// date DESCENDING and accumulate their scheduled amounts until the
    /// running total reaches or exceeds the POST-repayment remaining
    /// balance. Every payment touched by that walk is marked. The stop
    /// condition is driven by the remaining balance, never by the
    /// repayment amount itself.
    ///
    /// # Errors
    ///
    /// Returns a validation error (no mutation) when the contract is not
    /// approved, the amount is not positive, or the amount exceeds the
    /// balance.
    pub fn apply(
        contract: &Contract,
        payments: &[Payment],
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<RepaymentOutcome, RepaymentError> {
        if contract.status != ContractStatus::Approved {
            return Err(RepaymentError::ContractNotApproved(contract.status));
        }
        if amount <= Decimal::ZERO {
            return Err(RepaymentError::NonPositiveAmount(amount));
        }
        if amount > contract.balance {
            return Err(RepaymentError::ExceedsBalance {
                amount,
                balance: contract.balance,
            });
        }

        let new_balance = contract.balance - amount;

        let entry = NewLedgerEntry::new(
            contract.id,
            None,
            -amount,
            format!("Capital repayment of {amount}"),
            EntryType::Prepayment,
            today,
        );

        let marked_for_readjustment = Self::mark_for_readjustment(contract, payments, new_balance);

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Capital repayment processed".to_string(),
                message: format!(
                    "A capital repayment of {amount} was applied to contract {}.",
                    contract.id
                ),
                category: NotificationCategory::Repayment,
            });
            events.push(EngineEvent::CreditScoreRecalcRequested {
                user_id: applicant,
            });
        }

        Ok(RepaymentOutcome {
            new_balance,
            entry,
            marked_for_readjustment,
            close_contract: new_balance <= Decimal::ZERO,
            events,
        })
    }

    /// Selects the pending payments whose scheduled amounts are stale.
    ///
    /// The walk is latest-due-first and stops as soon as the accumulated
    /// scheduled amounts cover `remaining_balance`.
    fn mark_for_readjustment(
        contract: &Contract,
        payments: &[Payment],
        remaining_balance: Decimal,
    ) -> Vec<PaymentId> {
        let mut pending: Vec<&Payment> = payments
            .iter()
            .filter(|p| p.contract_id == contract.id && p.status == PaymentStatus::Pending)
            .collect();
        pending.sort_by(|a, b| b.due_date.cmp(&a.due_date));

        let mut marked = Vec::new();
        let mut accumulated = Decimal::ZERO;
        for payment in pending {
            if accumulated >= remaining_balance {
                break;
            }
            accumulated += payment.amount;
            marked.push(payment.id);
        }
        marked
    }
}
