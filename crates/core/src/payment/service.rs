//! Payment lifecycle state machine.
//!
//! Stateless service: every method takes the payment and its contract as
//! snapshots and returns a [`PaymentTransition`] describing what to persist
//! and which events to dispatch after the transaction commits. The balance
//! update, ledger appends, and status change in one action must be applied
//! in one atomic unit.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::contract::types::{Contract, ContractStatus};
use crate::events::{EngineEvent, NotificationCategory};
use crate::ledger::NewLedgerEntry;
use crate::ledger::types::EntryType;
use crate::payment::error::PaymentError;
use crate::payment::types::{Payment, PaymentAction, PaymentStatus, PaymentTransition};

/// Stateless service for payment lifecycle transitions.
pub struct PaymentService;

impl PaymentService {
    /// Submits a receipt for a pending payment and notifies the borrower.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptRequired` when no receipt artifact is attached, or
    /// `InvalidTransition` when the payment is not pending.
    pub fn submit(
        payment: &Payment,
        contract: &Contract,
        has_receipt: bool,
        receipt_date: NaiveDate,
    ) -> Result<PaymentTransition, PaymentError> {
        Self::check_ownership(payment, contract)?;
        if payment.status != PaymentStatus::Pending {
            return Err(PaymentError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Submitted,
            });
        }
        if !has_receipt {
            return Err(PaymentError::ReceiptRequired);
        }

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Payment submitted".to_string(),
                message: format!(
                    "Your {} payment of {} is now under review.",
                    payment.payment_type, payment.amount
                ),
                category: NotificationCategory::Payment,
            });
        }

        Ok(PaymentTransition {
            action: PaymentAction::Submit {
                new_status: PaymentStatus::Submitted,
                payment_date: receipt_date,
            },
            events,
        })
    }

    /// Approves a submitted payment and applies it to the contract.
    ///
    /// Interest is settled with a combined receipt:
    /// `paid_amount = amount + interest_amount`. The ledger receives one
    /// `Payment` entry of `-paid_amount` and, when interest was accrued,
    /// one `Interest` entry of `+interest_amount` materializing the charge
    /// at collection time. When the resulting balance is ≤ 0 the action
    /// flags the contract for automatic closing.
    ///
    /// The action stamps both `approved_at` and `payment_date`: a payment
    /// re-approved after an undo has no recorded receipt date anymore (the
    /// undo clears it), so the approval date stands in for it.
    pub fn approve(
        payment: &Payment,
        contract: &Contract,
        now: DateTime<Utc>,
    ) -> Result<PaymentTransition, PaymentError> {
        Self::check_ownership(payment, contract)?;
        if payment.status != PaymentStatus::Submitted {
            return Err(PaymentError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Paid,
            });
        }
        if contract.status != ContractStatus::Approved {
            return Err(PaymentError::ContractNotApproved(contract.status));
        }

        let paid_amount = payment.amount + payment.interest_amount;
        let new_contract_balance = contract.balance - paid_amount;
        let entry_date = payment.payment_date.unwrap_or_else(|| now.date_naive());

        let mut entries = vec![NewLedgerEntry::new(
            contract.id,
            Some(payment.id),
            -paid_amount,
            format!("{} payment received", payment.payment_type),
            EntryType::Payment,
            entry_date,
        )];
        if payment.interest_amount > Decimal::ZERO {
            entries.push(NewLedgerEntry::new(
                contract.id,
                Some(payment.id),
                payment.interest_amount,
                "Overdue interest collected".to_string(),
                EntryType::Interest,
                entry_date,
            ));
        }

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Payment approved".to_string(),
                message: format!(
                    "Your {} payment of {paid_amount} was approved.",
                    payment.payment_type
                ),
                category: NotificationCategory::Payment,
            });
        }
        events.push(EngineEvent::Notify {
            recipient: contract.created_by,
            title: "Payment approved".to_string(),
            message: format!(
                "Payment {} of {paid_amount} on contract {} was approved.",
                payment.id, contract.id
            ),
            category: NotificationCategory::Payment,
        });

        Ok(PaymentTransition {
            action: PaymentAction::Approve {
                new_status: PaymentStatus::Paid,
                approved_at: now,
                payment_date: entry_date,
                paid_amount,
                new_contract_balance,
                close_contract: new_contract_balance <= Decimal::ZERO,
                entries,
            },
            events,
        })
    }

    /// Rejects a submitted payment, notifying the borrower with the reason.
    pub fn reject(
        payment: &Payment,
        contract: &Contract,
        rejection_reason: String,
    ) -> Result<PaymentTransition, PaymentError> {
        Self::check_ownership(payment, contract)?;
        if rejection_reason.trim().is_empty() {
            return Err(PaymentError::RejectionReasonRequired);
        }
        if payment.status != PaymentStatus::Submitted {
            return Err(PaymentError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Rejected,
            });
        }

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Payment rejected".to_string(),
                message: format!(
                    "Your {} payment was rejected: {rejection_reason}",
                    payment.payment_type
                ),
                category: NotificationCategory::Payment,
            });
        }

        Ok(PaymentTransition {
            action: PaymentAction::Reject {
                new_status: PaymentStatus::Rejected,
                rejection_reason,
            },
            events,
        })
    }

    /// Reverses a paid payment back to submitted.
    ///
    /// Restores the contract balance by the collected amount and appends
    /// reversing ledger entries (the ledger is append-only; the reversal
    /// nets the original entries out). `paid_amount`, `approved_at` and
    /// `payment_date` are cleared by the caller per the returned action.
    pub fn undo(
        payment: &Payment,
        contract: &Contract,
        now: DateTime<Utc>,
    ) -> Result<PaymentTransition, PaymentError> {
        Self::check_ownership(payment, contract)?;
        if payment.status != PaymentStatus::Paid {
            return Err(PaymentError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Submitted,
            });
        }
        let paid_amount = payment
            .paid_amount
            .ok_or(PaymentError::MissingPaidAmount(payment.id))?;

        let entry_date = now.date_naive();
        let mut entries = vec![NewLedgerEntry::new(
            contract.id,
            Some(payment.id),
            paid_amount,
            format!("{} payment reversed", payment.payment_type),
            EntryType::Payment,
            entry_date,
        )];
        if payment.interest_amount > Decimal::ZERO {
            entries.push(NewLedgerEntry::new(
                contract.id,
                Some(payment.id),
                -payment.interest_amount,
                "Overdue interest charge reversed".to_string(),
                EntryType::Adjustment,
                entry_date,
            ));
        }

        Ok(PaymentTransition {
            action: PaymentAction::Undo {
                new_status: PaymentStatus::Submitted,
                new_contract_balance: contract.balance + paid_amount,
                entries,
            },
            events: vec![],
        })
    }

    fn check_ownership(payment: &Payment, contract: &Contract) -> Result<(), PaymentError> {
        if payment.contract_id != contract.id {
            return Err(PaymentError::ContractMismatch {
                payment_id: payment.id,
                contract_id: contract.id,
            });
        }
        Ok(())
    }
}
