//! Contract lifecycle state machine.
//!
//! Stateless service: every method takes the current contract snapshot and
//! returns a [`ContractTransition`] describing what to persist and which
//! events to dispatch after the transaction commits. All balance-affecting
//! directives inside an action must be applied in one atomic unit together
//! with the status change.

use chrono::{DateTime, Utc};
use lotfin_shared::config::ScheduleConfig;
use lotfin_shared::types::UserId;
use rust_decimal::Decimal;

use crate::contract::error::ContractError;
use crate::contract::schedule;
use crate::contract::types::{
    CancellationContext, Contract, ContractAction, ContractStatus, ContractTransition,
};
use crate::events::{EngineEvent, NotificationCategory};

/// Stateless service for contract lifecycle transitions.
pub struct ContractService;

impl ContractService {
    /// Checks the submission guard: a contract is complete when it has an
    /// applicant, a financing type, a positive term and principal, and
    /// non-negative reservation and down payment amounts.
    pub fn can_submit(contract: &Contract) -> Result<(), ContractError> {
        if contract.applicant_id.is_none() {
            return Err(ContractError::MissingApplicant);
        }
        if contract.financing_type.is_none() {
            return Err(ContractError::MissingFinancingType);
        }
        if contract.payment_term == 0 {
            return Err(ContractError::InvalidPaymentTerm);
        }
        if contract.amount <= Decimal::ZERO {
            return Err(ContractError::NonPositiveAmount(contract.amount));
        }
        if contract.reserve_amount < Decimal::ZERO {
            return Err(ContractError::NegativeReserveAmount(
                contract.reserve_amount,
            ));
        }
        if contract.down_payment < Decimal::ZERO {
            return Err(ContractError::NegativeDownPayment(contract.down_payment));
        }
        Ok(())
    }

    /// Submits a pending contract for review.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when not pending, or a guard error when
    /// the contract is incomplete. No transition occurs on failure.
    pub fn submit(
        contract: &Contract,
        submitted_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<ContractTransition, ContractError> {
        if contract.status != ContractStatus::Pending {
            return Err(ContractError::InvalidTransition {
                from: contract.status,
                to: ContractStatus::Submitted,
            });
        }
        Self::can_submit(contract)?;

        Ok(ContractTransition {
            action: ContractAction::Submit {
                new_status: ContractStatus::Submitted,
                submitted_by,
                submitted_at: now,
            },
            events: vec![],
        })
    }

    /// Approves a contract: generates the payment schedule, marks the
    /// contract active, and notifies the applicant.
    ///
    /// Allowed from pending, submitted, or rejected when the submission
    /// guard holds. The schedule (payments plus paired ledger entries)
    /// must be persisted in the same transaction as the status change.
    pub fn approve(
        contract: &Contract,
        approved_by: UserId,
        now: DateTime<Utc>,
        config: &ScheduleConfig,
    ) -> Result<ContractTransition, ContractError> {
        if !matches!(
            contract.status,
            ContractStatus::Pending | ContractStatus::Submitted | ContractStatus::Rejected
        ) {
            return Err(ContractError::InvalidTransition {
                from: contract.status,
                to: ContractStatus::Approved,
            });
        }
        Self::can_submit(contract)?;
        let applicant = contract
            .applicant_id
            .ok_or(ContractError::MissingApplicant)?;

        let schedule = schedule::generate(contract, now.date_naive(), config)?;

        Ok(ContractTransition {
            action: ContractAction::Approve {
                new_status: ContractStatus::Approved,
                approved_by,
                approved_at: now,
                active: true,
                schedule,
            },
            events: vec![EngineEvent::Notify {
                recipient: applicant,
                title: "Contract approved".to_string(),
                message: format!(
                    "Your financing contract {} has been approved and its payment schedule is ready.",
                    contract.id
                ),
                category: NotificationCategory::Contract,
            }],
        })
    }

    /// Rejects a contract under review, recording the reason.
    pub fn reject(
        contract: &Contract,
        rejection_reason: String,
    ) -> Result<ContractTransition, ContractError> {
        if rejection_reason.trim().is_empty() {
            return Err(ContractError::RejectionReasonRequired);
        }
        if !matches!(
            contract.status,
            ContractStatus::Pending | ContractStatus::Submitted
        ) {
            return Err(ContractError::InvalidTransition {
                from: contract.status,
                to: ContractStatus::Rejected,
            });
        }

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Contract rejected".to_string(),
                message: format!(
                    "Your financing contract {} was rejected: {rejection_reason}",
                    contract.id
                ),
                category: NotificationCategory::Contract,
            });
        }

        Ok(ContractTransition {
            action: ContractAction::Reject {
                new_status: ContractStatus::Rejected,
                rejection_reason,
            },
            events,
        })
    }

    /// Cancels a contract: deactivates it, directs the caller to destroy
    /// its payments and ledger entries and release the lot, and notifies
    /// the applicant.
    ///
    /// The actor is passed explicitly through [`CancellationContext`]; the
    /// engine keeps no ambient "current user" state.
    pub fn cancel(
        contract: &Contract,
        ctx: CancellationContext,
    ) -> Result<ContractTransition, ContractError> {
        if !matches!(
            contract.status,
            ContractStatus::Pending | ContractStatus::Submitted | ContractStatus::Rejected
        ) {
            return Err(ContractError::InvalidTransition {
                from: contract.status,
                to: ContractStatus::Cancelled,
            });
        }

        let mut events = vec![];
        if let Some(applicant) = contract.applicant_id {
            events.push(EngineEvent::Notify {
                recipient: applicant,
                title: "Contract cancelled".to_string(),
                message: format!("Your financing contract {} was cancelled.", contract.id),
                category: NotificationCategory::Contract,
            });
        }

        Ok(ContractTransition {
            action: ContractAction::Cancel {
                new_status: ContractStatus::Cancelled,
                cancelled_by: ctx.cancelled_by,
                note: ctx.note,
                active: false,
                release_lot: contract.lot_id,
                destroy_financials: true,
            },
            events,
        })
    }

    /// Closes a fully paid contract.
    ///
    /// Invoked automatically whenever a balance-affecting operation drives
    /// the balance to zero or below, or manually. Closing an already
    /// closed or cancelled contract is an idempotent no-op.
    pub fn close(
        contract: &Contract,
        now: DateTime<Utc>,
    ) -> Result<ContractTransition, ContractError> {
        match contract.status {
            ContractStatus::Closed | ContractStatus::Cancelled => Ok(ContractTransition {
                action: ContractAction::AlreadyClosed,
                events: vec![],
            }),
            ContractStatus::Approved => {
                if contract.balance > Decimal::ZERO {
                    return Err(ContractError::BalanceOutstanding(contract.balance));
                }

                let mut events = vec![];
                if let Some(applicant) = contract.applicant_id {
                    events.push(EngineEvent::Notify {
                        recipient: applicant,
                        title: "Contract closed".to_string(),
                        message: format!(
                            "Your financing contract {} is fully paid and now closed.",
                            contract.id
                        ),
                        category: NotificationCategory::Contract,
                    });
                }

                Ok(ContractTransition {
                    action: ContractAction::Close {
                        new_status: ContractStatus::Closed,
                        closed_at: now,
                    },
                    events,
                })
            }
            from => Err(ContractError::InvalidTransition {
                from,
                to: ContractStatus::Closed,
            }),
        }
    }
}
